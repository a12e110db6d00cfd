//! Abstract SQL statements.
//!
//! A statement describes one schema-mutating or read-only intention in
//! dialect-agnostic terms. Statements never contain SQL text; translation
//! happens in the generator crate.

mod changelog;
mod column;
mod constraint;
mod dml;
mod procedure;
mod sequence;
mod table;
mod view;

pub use changelog::{MarkChangeSetRanStatement, TagDatabaseStatement};
pub use column::{
    AddAutoIncrementStatement, AddColumnStatement, AddDefaultValueStatement, ColumnForeignKey,
    DropDefaultValueStatement, ForeignKeyReference, RenameColumnStatement,
    SetColumnRemarksStatement,
};
pub use constraint::{
    AddForeignKeyConstraintStatement, AddPrimaryKeyStatement, AddUniqueConstraintStatement,
    DropForeignKeyConstraintStatement, ForeignKeyAction,
};
pub use dml::{
    ColumnValue, InsertOrUpdateStatement, InsertStatement, RawSqlStatement,
    TableIsEmptyStatement, TableRowCountStatement, UpdateStatement,
};
pub use procedure::CreateProcedureStatement;
pub use sequence::{AlterSequenceStatement, CreateSequenceStatement, DropSequenceStatement};
pub use table::{RenameTableStatement, SetTableRemarksStatement};
pub use view::{CreateViewStatement, DropViewStatement, RenameViewStatement, SetViewRemarksStatement};

/// Every statement kind this core can translate.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlStatement {
    AddAutoIncrement(AddAutoIncrementStatement),
    AddColumn(AddColumnStatement),
    AddDefaultValue(AddDefaultValueStatement),
    AddForeignKeyConstraint(AddForeignKeyConstraintStatement),
    AddPrimaryKey(AddPrimaryKeyStatement),
    AddUniqueConstraint(AddUniqueConstraintStatement),
    AlterSequence(AlterSequenceStatement),
    CreateProcedure(CreateProcedureStatement),
    CreateSequence(CreateSequenceStatement),
    CreateView(CreateViewStatement),
    DropDefaultValue(DropDefaultValueStatement),
    DropForeignKeyConstraint(DropForeignKeyConstraintStatement),
    DropSequence(DropSequenceStatement),
    DropView(DropViewStatement),
    Insert(InsertStatement),
    InsertOrUpdate(InsertOrUpdateStatement),
    MarkChangeSetRan(MarkChangeSetRanStatement),
    RawSql(RawSqlStatement),
    RenameColumn(RenameColumnStatement),
    RenameTable(RenameTableStatement),
    RenameView(RenameViewStatement),
    SetColumnRemarks(SetColumnRemarksStatement),
    SetTableRemarks(SetTableRemarksStatement),
    SetViewRemarks(SetViewRemarksStatement),
    TableIsEmpty(TableIsEmptyStatement),
    TableRowCount(TableRowCountStatement),
    TagDatabase(TagDatabaseStatement),
    Update(UpdateStatement),
}

impl SqlStatement {
    /// Statement kind name, used in error and log messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddAutoIncrement(_) => "addAutoIncrement",
            Self::AddColumn(_) => "addColumn",
            Self::AddDefaultValue(_) => "addDefaultValue",
            Self::AddForeignKeyConstraint(_) => "addForeignKeyConstraint",
            Self::AddPrimaryKey(_) => "addPrimaryKey",
            Self::AddUniqueConstraint(_) => "addUniqueConstraint",
            Self::AlterSequence(_) => "alterSequence",
            Self::CreateProcedure(_) => "createProcedure",
            Self::CreateSequence(_) => "createSequence",
            Self::CreateView(_) => "createView",
            Self::DropDefaultValue(_) => "dropDefaultValue",
            Self::DropForeignKeyConstraint(_) => "dropForeignKeyConstraint",
            Self::DropSequence(_) => "dropSequence",
            Self::DropView(_) => "dropView",
            Self::Insert(_) => "insert",
            Self::InsertOrUpdate(_) => "insertOrUpdate",
            Self::MarkChangeSetRan(_) => "markChangeSetRan",
            Self::RawSql(_) => "rawSql",
            Self::RenameColumn(_) => "renameColumn",
            Self::RenameTable(_) => "renameTable",
            Self::RenameView(_) => "renameView",
            Self::SetColumnRemarks(_) => "setColumnRemarks",
            Self::SetTableRemarks(_) => "setTableRemarks",
            Self::SetViewRemarks(_) => "setViewRemarks",
            Self::TableIsEmpty(_) => "tableIsEmpty",
            Self::TableRowCount(_) => "tableRowCount",
            Self::TagDatabase(_) => "tagDatabase",
            Self::Update(_) => "update",
        }
    }
}

macro_rules! statement_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for SqlStatement {
            fn from(statement: $ty) -> Self {
                Self::$variant(statement)
            }
        })*
    };
}

statement_from! {
    AddAutoIncrement => AddAutoIncrementStatement,
    AddColumn => AddColumnStatement,
    AddDefaultValue => AddDefaultValueStatement,
    AddForeignKeyConstraint => AddForeignKeyConstraintStatement,
    AddPrimaryKey => AddPrimaryKeyStatement,
    AddUniqueConstraint => AddUniqueConstraintStatement,
    AlterSequence => AlterSequenceStatement,
    CreateProcedure => CreateProcedureStatement,
    CreateSequence => CreateSequenceStatement,
    CreateView => CreateViewStatement,
    DropDefaultValue => DropDefaultValueStatement,
    DropForeignKeyConstraint => DropForeignKeyConstraintStatement,
    DropSequence => DropSequenceStatement,
    DropView => DropViewStatement,
    Insert => InsertStatement,
    InsertOrUpdate => InsertOrUpdateStatement,
    MarkChangeSetRan => MarkChangeSetRanStatement,
    RawSql => RawSqlStatement,
    RenameColumn => RenameColumnStatement,
    RenameTable => RenameTableStatement,
    RenameView => RenameViewStatement,
    SetColumnRemarks => SetColumnRemarksStatement,
    SetTableRemarks => SetTableRemarksStatement,
    SetViewRemarks => SetViewRemarksStatement,
    TableIsEmpty => TableIsEmptyStatement,
    TableRowCount => TableRowCountStatement,
    TagDatabase => TagDatabaseStatement,
    Update => UpdateStatement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_names() {
        let statement: SqlStatement = RenameTableStatement::new("old", "new").into();
        assert_eq!(statement.name(), "renameTable");

        let statement: SqlStatement = TagDatabaseStatement::new("v1.0").into();
        assert_eq!(statement.name(), "tagDatabase");
    }
}
