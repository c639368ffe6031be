//! Typed record structures

use crate::error::{Error, Result};
use crate::types::{Scalar, Value};

/// A reducer output record with a validated shape
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row key
    pub key: Scalar,
    /// Column families in source order
    pub families: Vec<Family>,
}

/// A column family and its qualifiers
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub name: Scalar,
    /// `None` when the family maps to an absent value
    pub qualifiers: Option<Vec<Qualifier>>,
}

/// A qualifier and its cell value
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    pub name: Scalar,
    /// `None` when the cell is absent
    pub cell: Option<Scalar>,
}

impl Record {
    /// Create a record with no families
    pub fn new(key: impl Into<Scalar>) -> Self {
        Self {
            key: key.into(),
            families: Vec::new(),
        }
    }

    /// Append a cell, reusing the last family if it has the same name
    #[must_use]
    pub fn with_cell(
        mut self,
        family: impl Into<Scalar>,
        qualifier: impl Into<Scalar>,
        cell: impl Into<Scalar>,
    ) -> Self {
        let family = family.into();
        let qualifier = Qualifier {
            name: qualifier.into(),
            cell: Some(cell.into()),
        };

        match self.families.last_mut() {
            Some(Family {
                name,
                qualifiers: Some(qualifiers),
            }) if *name == family => qualifiers.push(qualifier),
            _ => self.families.push(Family {
                name: family,
                qualifiers: Some(vec![qualifier]),
            }),
        }
        self
    }

    /// Append a family that maps to an absent value
    #[must_use]
    pub fn with_null_family(mut self, family: impl Into<Scalar>) -> Self {
        self.families.push(Family {
            name: family.into(),
            qualifiers: None,
        });
        self
    }

    /// Convert a dynamic key/value pair into a record
    ///
    /// Returns `Ok(None)` when the key or the value is null: that pair carries
    /// nothing to write. A key that is not a scalar fails with
    /// [`Error::InvalidKey`]; a value that is not a mapping of scalars fails
    /// with [`Error::InvalidColumnData`]. Null families and null cells are kept
    /// as `None` rather than rejected.
    pub fn from_values(key: Value, value: Value) -> Result<Option<Self>> {
        if key.is_null() || value.is_null() {
            return Ok(None);
        }

        let key = Scalar::try_from(key).map_err(Error::invalid_key)?;
        let families = parse_families(value).map_err(Error::invalid_column_data)?;

        Ok(Some(Self { key, families }))
    }

    /// Number of present cells across all families
    pub fn cell_count(&self) -> usize {
        self.families
            .iter()
            .filter_map(|family| family.qualifiers.as_ref())
            .flatten()
            .filter(|qualifier| qualifier.cell.is_some())
            .count()
    }
}

fn parse_families(value: Value) -> Result<Vec<Family>> {
    expect_map(value)?
        .into_iter()
        .map(|(name, qualifiers)| {
            let name = Scalar::try_from(name)?;
            let qualifiers = match qualifiers {
                Value::Null => None,
                other => Some(parse_qualifiers(other)?),
            };
            Ok(Family { name, qualifiers })
        })
        .collect()
}

fn parse_qualifiers(value: Value) -> Result<Vec<Qualifier>> {
    expect_map(value)?
        .into_iter()
        .map(|(name, cell)| {
            let name = Scalar::try_from(name)?;
            let cell = match cell {
                Value::Null => None,
                other => Some(Scalar::try_from(other)?),
            };
            Ok(Qualifier { name, cell })
        })
        .collect()
}

fn expect_map(value: Value) -> Result<Vec<(Value, Value)>> {
    match value {
        Value::Map(pairs) => Ok(pairs),
        other => Err(Error::UnexpectedValueType {
            expected: "map",
            found: other.type_name(),
        }),
    }
}
