//! Storage engines outside the `allow-engine` list.

use schemalint_catalog::Schema;
use schemalint_core::{Annotation, LogicalSchema, Options};

use crate::problem::Problem;

/// Flags tables using a storage engine that is not in `allow-engine`.
pub struct BadEngineProblem;

impl Problem for BadEngineProblem {
    fn name(&self) -> &'static str {
        "bad-engine"
    }

    fn description(&self) -> &str {
        "Detects storage engines not listed in allow-engine"
    }

    fn check<'a>(&self, schema: &Schema, logical: &'a LogicalSchema, opts: &Options) -> Vec<Annotation<'a>> {
        schema
            .tables
            .iter()
            .filter(|table| !opts.is_engine_allowed(&table.engine))
            .filter_map(|table| {
                let statement = logical.create_for(&table.object_key())?;
                Some(Annotation::new(
                    statement,
                    "Storage engine not permitted",
                    format!(
                        "Table `{}` uses storage engine {}, which is not listed in option allow-engine ({})",
                        table.name,
                        table.engine,
                        opts.allowed_engines.join(", ")
                    ),
                ))
            })
            .collect()
    }
}
