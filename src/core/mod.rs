//! Core business logic. Nothing in here knows about HTTP.

/// Employee roster
pub mod employee;
/// Accounts payable, paid accounts and expenses
pub mod financials;
/// Invoices billed against projects
pub mod invoice;
/// Payments and the weekly payroll sheet
pub mod payroll;
/// Calendar helpers
pub mod period;
/// Projects and project costs
pub mod project;
/// Reports and the dashboard summary
pub mod report;
/// Validate-then-persist submissions and guarded deletes
pub mod submission;
/// Form validation rules
pub mod validation;
/// Daily work logs
pub mod work_log;
