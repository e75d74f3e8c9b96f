//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod accounts_payable;
pub mod employee;
pub mod expense;
pub mod invoice;
pub mod paid_account;
pub mod payment;
pub mod project;
pub mod project_cost;
pub mod work_log;

// Re-export specific types to avoid conflicts
pub use accounts_payable::{
    Column as AccountsPayableColumn, Entity as AccountsPayable, Model as AccountsPayableModel,
};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use invoice::{Column as InvoiceColumn, Entity as Invoice, Model as InvoiceModel};
pub use paid_account::{
    Column as PaidAccountColumn, Entity as PaidAccount, Model as PaidAccountModel,
};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use project_cost::{
    Column as ProjectCostColumn, Entity as ProjectCost, Model as ProjectCostModel,
};
pub use work_log::{Column as WorkLogColumn, Entity as WorkLog, Model as WorkLogModel};
