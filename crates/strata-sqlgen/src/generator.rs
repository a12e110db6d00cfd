//! The generator trait and its priority model.

use strata_core::{Database, Sql, SqlStatement, ValidationErrors};

use crate::dispatch::SqlGeneratorChain;
use crate::error::Result;

/// Priority of generators that implement a statement in portable SQL.
pub const PRIORITY_DEFAULT: i32 = 1;

/// Priority of generators that override the portable form for one
/// dialect (or dialect family). Higher priorities run first and may
/// delegate down the chain.
pub const PRIORITY_DIALECT: i32 = 5;

/// Translates abstract statements into dialect SQL.
///
/// For each statement the registry collects every generator whose
/// [`supports`](Self::supports) returns `true`, sorts them by descending
/// [`priority`](Self::priority) and hands the highest-priority one a
/// [`SqlGeneratorChain`] cursor over the rest. A dialect override can
/// therefore rewrite the statement, post-process the chain's output, or
/// produce SQL without consulting it at all.
pub trait SqlGenerator: Send + Sync {
    /// Sort key for dispatch; ties keep registration order.
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Whether this generator can handle the statement on this target.
    fn supports(&self, statement: &SqlStatement, database: &Database) -> bool;

    /// Statement-level validation. Errors abort generation; warnings are
    /// surfaced to the caller. The default delegates down the chain.
    fn validate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        chain: &mut SqlGeneratorChain<'_>,
    ) -> ValidationErrors {
        chain.validate(statement, database)
    }

    /// Produces the SQL for the statement.
    fn generate(
        &self,
        statement: &SqlStatement,
        database: &Database,
        chain: &mut SqlGeneratorChain<'_>,
    ) -> Result<Vec<Sql>>;
}
