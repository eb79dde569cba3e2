//! Tables without a primary key.

use schemalint_catalog::Schema;
use schemalint_core::{Annotation, LogicalSchema, Options};

use crate::problem::Problem;

/// Flags tables that do not define a primary key.
pub struct NoPrimaryKeyProblem;

impl Problem for NoPrimaryKeyProblem {
    fn name(&self) -> &'static str {
        "no-pk"
    }

    fn description(&self) -> &str {
        "Detects tables without a primary key"
    }

    fn check<'a>(&self, schema: &Schema, logical: &'a LogicalSchema, _opts: &Options) -> Vec<Annotation<'a>> {
        schema
            .tables
            .iter()
            .filter(|table| table.primary_key.is_none())
            .filter_map(|table| {
                let statement = logical.create_for(&table.object_key())?;
                Some(Annotation::new(
                    statement,
                    "Missing primary key",
                    format!(
                        "Table `{}` does not define a PRIMARY KEY. Tables without one are slower to replicate and cannot be reliably updated by row",
                        table.name
                    ),
                ))
            })
            .collect()
    }
}
