//! Built-in generators, one module per statement family.

mod auto_increment;
mod changelog;
mod column;
mod constraint;
mod defaults;
mod dml;
mod foreign_key;
mod procedure;
mod rename_column;
mod sequence;
mod table;
mod view;

pub use auto_increment::{AddAutoIncrementGenerator, InformixAddAutoIncrementGenerator};
pub use changelog::{MarkChangeSetRanGenerator, TagCleanupGenerator, TagDatabaseGenerator};
pub use column::AddColumnGenerator;
pub use constraint::{AddPrimaryKeyGenerator, AddUniqueConstraintGenerator};
pub use defaults::{AddDefaultValueGenerator, DropDefaultValueGenerator};
pub use dml::{
    InsertGenerator, InsertOrUpdateGenerator, RawSqlGenerator, TableIsEmptyGenerator,
    TableRowCountGenerator, UpdateGenerator,
};
pub use foreign_key::{AddForeignKeyConstraintGenerator, DropForeignKeyConstraintGenerator};
pub use procedure::CreateProcedureGenerator;
pub use rename_column::RenameColumnGenerator;
pub use sequence::{AlterSequenceGenerator, CreateSequenceGenerator, DropSequenceGenerator};
pub use table::{RenameTableGenerator, SetColumnRemarksGenerator, SetTableRemarksGenerator};
pub use view::{
    CreateViewGenerator, DropViewGenerator, RenameViewGenerator, SetViewRemarksGenerator,
};

use crate::generator::SqlGenerator;

/// Every built-in generator, in registration order.
#[must_use]
pub fn builtins() -> Vec<Box<dyn SqlGenerator>> {
    vec![
        Box::new(AddAutoIncrementGenerator),
        Box::new(InformixAddAutoIncrementGenerator),
        Box::new(AddColumnGenerator),
        Box::new(AddDefaultValueGenerator),
        Box::new(DropDefaultValueGenerator),
        Box::new(AddForeignKeyConstraintGenerator),
        Box::new(DropForeignKeyConstraintGenerator),
        Box::new(AddPrimaryKeyGenerator),
        Box::new(AddUniqueConstraintGenerator),
        Box::new(CreateSequenceGenerator),
        Box::new(AlterSequenceGenerator),
        Box::new(DropSequenceGenerator),
        Box::new(CreateProcedureGenerator),
        Box::new(RenameColumnGenerator),
        Box::new(RenameTableGenerator),
        Box::new(SetTableRemarksGenerator),
        Box::new(SetColumnRemarksGenerator),
        Box::new(CreateViewGenerator),
        Box::new(DropViewGenerator),
        Box::new(RenameViewGenerator),
        Box::new(SetViewRemarksGenerator),
        Box::new(InsertGenerator),
        Box::new(UpdateGenerator),
        Box::new(InsertOrUpdateGenerator),
        Box::new(RawSqlGenerator),
        Box::new(TableRowCountGenerator),
        Box::new(TableIsEmptyGenerator),
        Box::new(MarkChangeSetRanGenerator),
        Box::new(TagDatabaseGenerator),
        Box::new(TagCleanupGenerator),
    ]
}
