//! Generator registry and dispatch chain.

use tracing::{debug, warn};

use strata_core::{Database, DatabaseObject, Sql, SqlStatement, ValidationErrors};

use crate::error::{GenerateError, Result};
use crate::generator::SqlGenerator;
use crate::generators;

/// Holds every registered generator and dispatches statements to them.
///
/// Dispatch is deterministic: supporting generators are ordered by
/// descending priority, with registration order breaking ties.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn SqlGenerator>>,
}

impl GeneratorRegistry {
    /// An empty registry; useful for tests exercising a single generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// A registry pre-loaded with every built-in generator.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for generator in generators::builtins() {
            registry.register(generator);
        }
        registry
    }

    /// Registers an additional generator. Registered after the built-ins,
    /// so at equal priority the built-ins win; register overrides with a
    /// higher priority.
    pub fn register(&mut self, generator: Box<dyn SqlGenerator>) {
        self.generators.push(generator);
    }

    /// Generators supporting the statement, best first.
    fn supporting(&self, statement: &SqlStatement, database: &Database) -> Vec<&dyn SqlGenerator> {
        let mut matching: Vec<&dyn SqlGenerator> = self
            .generators
            .iter()
            .map(AsRef::as_ref)
            .filter(|g| g.supports(statement, database))
            .collect();
        matching.sort_by_key(|g| std::cmp::Reverse(g.priority()));
        matching
    }

    /// Whether any generator can handle the statement on this target.
    #[must_use]
    pub fn supports(&self, statement: &SqlStatement, database: &Database) -> bool {
        self.generators
            .iter()
            .any(|g| g.supports(statement, database))
    }

    /// Runs statement validation without generating SQL.
    #[must_use]
    pub fn validate(&self, statement: &SqlStatement, database: &Database) -> ValidationErrors {
        let mut chain = SqlGeneratorChain::new(self, self.supporting(statement, database));
        chain.validate(statement, database)
    }

    /// Validates and generates the SQL for one statement.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::NotSupported`] when no generator supports
    /// the statement on this target, [`GenerateError::Validation`] when
    /// validation produced errors, or whatever the generator itself failed
    /// with.
    pub fn generate_sql(&self, statement: &SqlStatement, database: &Database) -> Result<Vec<Sql>> {
        let supporting = self.supporting(statement, database);
        if supporting.is_empty() {
            return Err(GenerateError::not_supported(
                statement,
                database,
                "no generator supports this statement",
            ));
        }

        let errors = SqlGeneratorChain::new(self, supporting.clone()).validate(statement, database);
        if errors.has_errors() {
            return Err(GenerateError::Validation(errors));
        }
        for warning in errors.warning_messages() {
            warn!(statement = statement.name(), "{warning}");
        }

        debug!(
            statement = statement.name(),
            dialect = database.dialect().name(),
            generators = supporting.len(),
            "generating sql"
        );
        SqlGeneratorChain::new(self, supporting).generate(statement, database)
    }

    /// Generates SQL for a batch of statements, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first statement that cannot be generated.
    pub fn generate_all(
        &self,
        statements: &[SqlStatement],
        database: &Database,
    ) -> Result<Vec<Sql>> {
        let mut out = Vec::new();
        for statement in statements {
            out.extend(self.generate_sql(statement, database)?);
        }
        Ok(out)
    }

    /// The schema objects the statement's SQL would touch, deduplicated.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate_sql`].
    pub fn affected_objects(
        &self,
        statement: &SqlStatement,
        database: &Database,
    ) -> Result<Vec<DatabaseObject>> {
        let mut objects: Vec<DatabaseObject> = Vec::new();
        for sql in self.generate_sql(statement, database)? {
            for object in sql.affected_objects() {
                if !objects.contains(object) {
                    objects.push(object.clone());
                }
            }
        }
        Ok(objects)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Cursor over the generators supporting one statement.
///
/// Each call to [`generate`](Self::generate) or
/// [`validate`](Self::validate) advances past the current generator and
/// invokes the next one; an exhausted chain generates nothing and
/// validates clean, so the lowest-priority generator can still delegate
/// without special-casing the end.
pub struct SqlGeneratorChain<'a> {
    registry: &'a GeneratorRegistry,
    generators: Vec<&'a dyn SqlGenerator>,
    pos: usize,
}

impl<'a> SqlGeneratorChain<'a> {
    fn new(registry: &'a GeneratorRegistry, generators: Vec<&'a dyn SqlGenerator>) -> Self {
        Self {
            registry,
            generators,
            pos: 0,
        }
    }

    /// The registry that built this chain, for generators that emit
    /// trailing statements through a fresh dispatch (e.g. the unique and
    /// foreign key constraints an added column carries).
    #[must_use]
    pub const fn registry(&self) -> &'a GeneratorRegistry {
        self.registry
    }

    /// Runs the next generator in the chain.
    ///
    /// # Errors
    ///
    /// Propagates the next generator's failure.
    pub fn generate(&mut self, statement: &SqlStatement, database: &Database) -> Result<Vec<Sql>> {
        match self.next_generator() {
            Some(generator) => generator.generate(statement, database, self),
            None => Ok(Vec::new()),
        }
    }

    /// Runs the next generator's validation.
    #[must_use]
    pub fn validate(
        &mut self,
        statement: &SqlStatement,
        database: &Database,
    ) -> ValidationErrors {
        match self.next_generator() {
            Some(generator) => generator.validate(statement, database, self),
            None => ValidationErrors::new(),
        }
    }

    fn next_generator(&mut self) -> Option<&'a dyn SqlGenerator> {
        let generator = self.generators.get(self.pos).copied();
        self.pos += 1;
        generator
    }
}
