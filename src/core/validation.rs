//! Form validation.
//!
//! Every submitted form is a flat map of field name to raw string. Validation turns that
//! map into a typed form ([`ValidForm`]) or a map of field name to a single human-readable
//! message ([`FieldErrors`]). Only the first rule that fails for a field is reported.
//!
//! There is one canonical schema per form type; see [`FormType`] for the keys and
//! [`PaymentMethod`], [`CostType`] and [`PayableStatus`] for the enumerated values.

use crate::core::period::{parse_iso_date, parse_time_of_day, today};
use crate::errors::Error;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Raw submitted fields, keyed by form field name.
pub type FormFields = BTreeMap<String, String>;

/// Validation errors, keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Maximum length of names (employee, project, supplier, category).
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Schema key selecting which rule set applies to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    /// `employee`
    Employee,
    /// `worklog`
    WorkLog,
    /// `payment`
    Payment,
    /// `project`
    Project,
    /// `project_cost`
    ProjectCost,
    /// `invoice`
    Invoice,
    /// `accounts_payable`
    AccountsPayable,
    /// `paid_account`
    PaidAccount,
    /// `expense`
    Expense,
}

impl FormType {
    /// Every form type, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Employee,
        Self::WorkLog,
        Self::Payment,
        Self::Project,
        Self::ProjectCost,
        Self::Invoice,
        Self::AccountsPayable,
        Self::PaidAccount,
        Self::Expense,
    ];

    /// The key used in URLs and by [`validate`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::WorkLog => "worklog",
            Self::Payment => "payment",
            Self::Project => "project",
            Self::ProjectCost => "project_cost",
            Self::Invoice => "invoice",
            Self::AccountsPayable => "accounts_payable",
            Self::PaidAccount => "paid_account",
            Self::Expense => "expense",
        }
    }

    /// Human-readable name of the record this form creates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::WorkLog => "Work log",
            Self::Payment => "Payment",
            Self::Project => "Project",
            Self::ProjectCost => "Project cost",
            Self::Invoice => "Invoice",
            Self::AccountsPayable => "Account payable",
            Self::PaidAccount => "Paid account",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|form_type| form_type.as_str() == s)
            .ok_or_else(|| Error::bad_request(format!("Unknown form type: {s}")))
    }
}

/// Declares a closed set of lower-case string values with `as_str` / `FromStr`.
/// Parsing ignores case and surrounding whitespace.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Every allowed value.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The stored string form.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or(())
            }
        }
    };
}

string_enum! {
    /// How money changed hands.
    PaymentMethod {
        /// Paid in cash
        Cash => "cash",
        /// Paid by check; a check number is then required
        Check => "check",
        /// Bank transfer into the payee's account
        DirectDeposit => "direct deposit",
    }
}

string_enum! {
    /// Kind of project cost.
    CostType {
        /// Materials and supplies
        Material => "material",
        /// Labour
        Employee => "employee",
    }
}

string_enum! {
    /// Settlement state of an account payable.
    PayableStatus {
        /// Not paid yet
        Pending => "pending",
        /// Settled
        Paid => "paid",
    }
}

/// Validated employee form
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub name: String,
    pub hourly_rate: f64,
}

/// Validated work log form
#[derive(Debug, Clone, PartialEq)]
pub struct WorkLogForm {
    pub employee_id: i64,
    pub log_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub exit_time: NaiveTime,
    /// Minutes
    pub lunch_duration: i32,
}

/// Validated payroll payment form
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub employee_id: i64,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub check_number: Option<String>,
    pub check_bank: Option<String>,
    pub notes: Option<String>,
}

/// Validated project form
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub name: String,
    pub value: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Validated project cost form
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCostForm {
    pub project_id: i64,
    pub cost_type: CostType,
    pub description: String,
    pub amount: f64,
}

/// Validated invoice form
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub project_id: i64,
    pub amount_charged: f64,
    pub invoice_date: NaiveDate,
}

/// Validated accounts payable form
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsPayableForm {
    pub supplier: String,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub invoice_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub category: String,
    pub status: PayableStatus,
    pub notes: Option<String>,
}

/// Validated paid account form
#[derive(Debug, Clone, PartialEq)]
pub struct PaidAccountForm {
    pub supplier: String,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub check_number: Option<String>,
    pub check_bank: Option<String>,
    pub payment_proof: Option<String>,
    pub notes: Option<String>,
}

/// Validated expense form
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// A form that passed validation, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidForm {
    Employee(EmployeeForm),
    WorkLog(WorkLogForm),
    Payment(PaymentForm),
    Project(ProjectForm),
    ProjectCost(ProjectCostForm),
    Invoice(InvoiceForm),
    AccountsPayable(AccountsPayableForm),
    PaidAccount(PaidAccountForm),
    Expense(ExpenseForm),
}

impl ValidForm {
    /// The form type this value was validated against.
    #[must_use]
    pub const fn form_type(&self) -> FormType {
        match self {
            Self::Employee(_) => FormType::Employee,
            Self::WorkLog(_) => FormType::WorkLog,
            Self::Payment(_) => FormType::Payment,
            Self::Project(_) => FormType::Project,
            Self::ProjectCost(_) => FormType::ProjectCost,
            Self::Invoice(_) => FormType::Invoice,
            Self::AccountsPayable(_) => FormType::AccountsPayable,
            Self::PaidAccount(_) => FormType::PaidAccount,
            Self::Expense(_) => FormType::Expense,
        }
    }
}

/// Reads typed values out of [`FormFields`], collecting the first error per field.
struct FieldReader<'a> {
    fields: &'a FormFields,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    const fn new(fields: &'a FormFields) -> Self {
        Self {
            fields,
            errors: BTreeMap::new(),
        }
    }

    /// Trimmed value, `None` when absent or blank.
    fn raw(&self, name: &str) -> Option<&'a str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors
            .entry(name.to_string())
            .or_insert_with(|| message.into());
    }

    fn has_error(&self, name: &str) -> bool {
        self.errors.contains_key(name)
    }

    fn required(&mut self, name: &str, label: &str) -> Option<&'a str> {
        let value = self.raw(name);
        if value.is_none() {
            self.reject(name, format!("{label} is required"));
        }
        value
    }

    fn text(&mut self, name: &str, label: &str, max_len: usize) -> Option<String> {
        let value = self.required(name, label)?;
        if value.chars().count() > max_len {
            self.reject(
                name,
                format!("{label} is too long (maximum {max_len} characters)"),
            );
            return None;
        }
        Some(value.to_string())
    }

    fn optional_text(&self, name: &str) -> Option<String> {
        self.raw(name).map(ToString::to_string)
    }

    fn positive_amount(&mut self, name: &str, label: &str) -> Option<f64> {
        let value = self.required(name, label)?;
        match value.parse::<f64>() {
            Ok(amount) if amount.is_finite() => {
                if amount <= 0.0 {
                    self.reject(name, format!("{label} must be greater than zero"));
                    None
                } else {
                    Some(amount)
                }
            }
            _ => {
                self.reject(name, format!("{label} must be a valid number"));
                None
            }
        }
    }

    fn record_id(&mut self, name: &str, label: &str) -> Option<i64> {
        let value = self.required(name, label)?;
        match value.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                self.reject(name, format!("{label} must be a valid selection"));
                None
            }
        }
    }

    fn date(&mut self, name: &str, label: &str) -> Option<NaiveDate> {
        let value = self.required(name, label)?;
        let parsed = parse_iso_date(value);
        if parsed.is_none() {
            self.reject(name, "Invalid date format");
        }
        parsed
    }

    fn optional_date(&mut self, name: &str) -> Option<NaiveDate> {
        let value = self.raw(name)?;
        let parsed = parse_iso_date(value);
        if parsed.is_none() {
            self.reject(name, "Invalid date format");
        }
        parsed
    }

    fn time(&mut self, name: &str, label: &str) -> Option<NaiveTime> {
        let value = self.required(name, label)?;
        let parsed = parse_time_of_day(value);
        if parsed.is_none() {
            self.reject(name, "Invalid time format");
        }
        parsed
    }

    fn choice<T: FromStr>(&mut self, name: &str, label: &str) -> Option<T> {
        let value = self.required(name, label)?;
        let parsed = value.parse::<T>().ok();
        if parsed.is_none() {
            self.reject(name, format!("Invalid {}", label.to_lowercase()));
        }
        parsed
    }

    fn not_after(&mut self, name: &str, date: Option<NaiveDate>, limit: NaiveDate, message: &str) {
        if date.is_some_and(|d| d > limit) {
            self.reject(name, message);
        }
    }

    /// Check number is mandatory whenever the method is a check.
    fn check_number(&mut self, method: Option<PaymentMethod>) -> Option<String> {
        let number = self.optional_text("check_number");
        if method == Some(PaymentMethod::Check) && number.is_none() {
            self.reject("check_number", "Check number is required for check payments");
        }
        number
    }

    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        // every field read above succeeded, so build() sees only Some values
        build().ok_or(self.errors)
    }
}

fn employee_form(r: &mut FieldReader<'_>) -> Option<EmployeeForm> {
    let name = r.text("name", "Employee name", MAX_NAME_LEN);
    let hourly_rate = r.positive_amount("hourly_rate", "Hourly rate");
    Some(EmployeeForm {
        name: name?,
        hourly_rate: hourly_rate?,
    })
}

fn work_log_form(r: &mut FieldReader<'_>, today: NaiveDate) -> Option<WorkLogForm> {
    let employee_id = r.record_id("employee_id", "Employee");

    let log_date = r.date("log_date", "Date");
    r.not_after("log_date", log_date, today, "Work log date cannot be in the future");

    let entry_time = r.time("entry_time", "Entry time");
    let exit_time = r.time("exit_time", "Exit time");
    if let (Some(entry), Some(exit)) = (entry_time, exit_time) {
        if entry >= exit {
            r.reject("exit_time", "Exit time must be after entry time");
        }
    }

    let lunch_duration = match r.raw("lunch_duration") {
        None => Some(0),
        Some(value) => match value.parse::<i32>() {
            Ok(minutes) if minutes < 0 => {
                r.reject("lunch_duration", "Lunch duration cannot be negative");
                None
            }
            Ok(minutes) => Some(minutes),
            Err(_) => {
                r.reject("lunch_duration", "Lunch duration must be a valid number");
                None
            }
        },
    };

    Some(WorkLogForm {
        employee_id: employee_id?,
        log_date: log_date?,
        entry_time: entry_time?,
        exit_time: exit_time?,
        lunch_duration: lunch_duration?,
    })
}

fn payment_form(r: &mut FieldReader<'_>, today: NaiveDate) -> Option<PaymentForm> {
    let employee_id = r.record_id("employee_id", "Employee");
    let amount = r.positive_amount("amount", "Payment amount");
    let payment_method = r.choice::<PaymentMethod>("payment_method", "Payment method");
    let check_number = r.check_number(payment_method);
    let payment_date = r.date("payment_date", "Payment date");
    r.not_after(
        "payment_date",
        payment_date,
        today,
        "Payment date cannot be in the future",
    );

    Some(PaymentForm {
        employee_id: employee_id?,
        amount: amount?,
        payment_method: payment_method?,
        payment_date: payment_date?,
        check_number,
        check_bank: r.optional_text("check_bank"),
        notes: r.optional_text("notes"),
    })
}

fn project_form(r: &mut FieldReader<'_>) -> Option<ProjectForm> {
    let name = r.text("name", "Project name", MAX_NAME_LEN);
    let value = r.positive_amount("value", "Project value");
    let start_date = r.date("start_date", "Start date");
    let end_date = r.optional_date("end_date");
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            r.reject("end_date", "End date cannot be before start date");
        }
    }

    Some(ProjectForm {
        name: name?,
        value: value?,
        start_date: start_date?,
        end_date,
    })
}

fn project_cost_form(r: &mut FieldReader<'_>) -> Option<ProjectCostForm> {
    let project_id = r.record_id("project_id", "Project");
    let cost_type = r.choice::<CostType>("cost_type", "Cost type");
    let description = r.text("description", "Description", MAX_DESCRIPTION_LEN);
    let amount = r.positive_amount("amount", "Cost amount");

    Some(ProjectCostForm {
        project_id: project_id?,
        cost_type: cost_type?,
        description: description?,
        amount: amount?,
    })
}

fn invoice_form(r: &mut FieldReader<'_>) -> Option<InvoiceForm> {
    let project_id = r.record_id("project_id", "Project");
    let amount_charged = r.positive_amount("amount_charged", "Invoice amount");
    let invoice_date = r.date("invoice_date", "Invoice date");

    Some(InvoiceForm {
        project_id: project_id?,
        amount_charged: amount_charged?,
        invoice_date: invoice_date?,
    })
}

fn accounts_payable_form(r: &mut FieldReader<'_>) -> Option<AccountsPayableForm> {
    let supplier = r.text("supplier", "Supplier", MAX_NAME_LEN);
    let description = r.text("description", "Description", MAX_DESCRIPTION_LEN);
    let amount = r.positive_amount("amount", "Amount");
    let due_date = r.date("due_date", "Due date");
    let invoice_date = r.optional_date("invoice_date");
    if let (Some(due), Some(invoiced)) = (due_date, invoice_date) {
        if invoiced > due {
            r.reject("invoice_date", "Invoice date cannot be after due date");
        }
    }
    let payment_method = r.choice::<PaymentMethod>("payment_method", "Payment method");
    let category = r.text("category", "Category", MAX_NAME_LEN);
    let status = r.choice::<PayableStatus>("status", "Status");

    Some(AccountsPayableForm {
        supplier: supplier?,
        description: description?,
        amount: amount?,
        due_date: due_date?,
        invoice_date,
        payment_method: payment_method?,
        category: category?,
        status: status?,
        notes: r.optional_text("notes"),
    })
}

fn paid_account_form(r: &mut FieldReader<'_>, today: NaiveDate) -> Option<PaidAccountForm> {
    let supplier = r.text("supplier", "Supplier", MAX_NAME_LEN);
    let amount_paid = r.positive_amount("amount_paid", "Amount paid");
    let payment_date = r.date("payment_date", "Payment date");
    r.not_after(
        "payment_date",
        payment_date,
        today,
        "Payment date cannot be in the future",
    );
    let payment_method = r.choice::<PaymentMethod>("payment_method", "Payment method");
    let check_number = r.check_number(payment_method);

    Some(PaidAccountForm {
        supplier: supplier?,
        amount_paid: amount_paid?,
        payment_date: payment_date?,
        payment_method: payment_method?,
        check_number,
        check_bank: r.optional_text("check_bank"),
        payment_proof: r.optional_text("payment_proof"),
        notes: r.optional_text("notes"),
    })
}

fn expense_form(r: &mut FieldReader<'_>, today: NaiveDate) -> Option<ExpenseForm> {
    let description = r.text("description", "Description", MAX_DESCRIPTION_LEN);
    let amount = r.positive_amount("amount", "Expense amount");
    let expense_date = r.date("expense_date", "Expense date");
    r.not_after(
        "expense_date",
        expense_date,
        today,
        "Expense date cannot be in the future",
    );
    let category = r.text("category", "Expense category", MAX_NAME_LEN);
    let payment_method = r.choice::<PaymentMethod>("payment_method", "Payment method");

    Some(ExpenseForm {
        description: description?,
        amount: amount?,
        expense_date: expense_date?,
        category: category?,
        payment_method: payment_method?,
        notes: r.optional_text("notes"),
    })
}

/// Validates `fields` against the rules for `form_type` and returns the typed form.
///
/// `today` anchors the "not in the future" rules so the function stays pure.
///
/// # Errors
/// Returns the per-field messages when any rule fails.
pub fn parse_form(
    form_type: FormType,
    fields: &FormFields,
    today: NaiveDate,
) -> Result<ValidForm, FieldErrors> {
    let mut r = FieldReader::new(fields);
    let form = match form_type {
        FormType::Employee => employee_form(&mut r).map(ValidForm::Employee),
        FormType::WorkLog => work_log_form(&mut r, today).map(ValidForm::WorkLog),
        FormType::Payment => payment_form(&mut r, today).map(ValidForm::Payment),
        FormType::Project => project_form(&mut r).map(ValidForm::Project),
        FormType::ProjectCost => project_cost_form(&mut r).map(ValidForm::ProjectCost),
        FormType::Invoice => invoice_form(&mut r).map(ValidForm::Invoice),
        FormType::AccountsPayable => accounts_payable_form(&mut r).map(ValidForm::AccountsPayable),
        FormType::PaidAccount => paid_account_form(&mut r, today).map(ValidForm::PaidAccount),
        FormType::Expense => expense_form(&mut r, today).map(ValidForm::Expense),
    };
    r.finish(|| form)
}

/// The error map returned for a form type nobody registered.
#[must_use]
pub fn unknown_form_errors(form_type: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("form".to_string(), format!("Unknown form type: {form_type}"));
    errors
}

/// Validates `fields` for the form named `form_type`, judging dates against `today`.
///
/// An empty map means the record is acceptable to persist. An unknown form type yields
/// a single `"form"` entry rather than an empty map.
#[must_use]
pub fn validate_on(form_type: &str, fields: &FormFields, today: NaiveDate) -> FieldErrors {
    match form_type.parse::<FormType>() {
        Ok(form_type) => parse_form(form_type, fields, today)
            .err()
            .unwrap_or_default(),
        Err(_) => unknown_form_errors(form_type),
    }
}

/// Validates `fields` for the form named `form_type` using the current local date.
#[must_use]
pub fn validate(form_type: &str, fields: &FormFields) -> FieldErrors {
    validate_on(form_type, fields, today())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn worklog(entry: &str, exit: &str) -> FormFields {
        fields(&[
            ("employee_id", "1"),
            ("log_date", "2024-06-14"),
            ("entry_time", entry),
            ("exit_time", exit),
            ("lunch_duration", "45"),
        ])
    }

    #[test]
    fn test_valid_employee_has_no_errors() {
        let f = fields(&[("name", "Ana Souza"), ("hourly_rate", "27.5")]);
        assert!(validate_on("employee", &f, day()).is_empty());

        let long_but_ok = "x".repeat(100);
        let f = fields(&[("name", &long_but_ok), ("hourly_rate", "1")]);
        assert!(validate_on("employee", &f, day()).is_empty());
    }

    #[test]
    fn test_employee_hourly_rate_rules() {
        for rate in ["0", "-3", "abc", "NaN", "inf"] {
            let f = fields(&[("name", "Ana"), ("hourly_rate", rate)]);
            let errors = validate_on("employee", &f, day());
            assert!(errors.contains_key("hourly_rate"), "rate {rate}");
        }

        let f = fields(&[("name", "Ana"), ("hourly_rate", "0")]);
        assert_eq!(
            validate_on("employee", &f, day())["hourly_rate"],
            "Hourly rate must be greater than zero"
        );
        let f = fields(&[("name", "Ana"), ("hourly_rate", "ten")]);
        assert_eq!(
            validate_on("employee", &f, day())["hourly_rate"],
            "Hourly rate must be a valid number"
        );
    }

    #[test]
    fn test_employee_name_required_and_bounded() {
        let f = fields(&[("name", "   "), ("hourly_rate", "20")]);
        assert_eq!(
            validate_on("employee", &f, day())["name"],
            "Employee name is required"
        );

        let too_long = "x".repeat(101);
        let f = fields(&[("name", &too_long), ("hourly_rate", "20")]);
        assert_eq!(
            validate_on("employee", &f, day())["name"],
            "Employee name is too long (maximum 100 characters)"
        );
    }

    #[test]
    fn test_unknown_form_type() {
        let errors = validate_on("timesheet", &FormFields::new(), day());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["form"], "Unknown form type: timesheet");
    }

    #[test]
    fn test_worklog_valid() {
        let form = parse_form(FormType::WorkLog, &worklog("09:00", "17:00"), day()).unwrap();
        let ValidForm::WorkLog(log) = form else {
            panic!("expected a work log");
        };
        assert_eq!(log.lunch_duration, 45);
        assert_eq!(log.entry_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_worklog_exit_must_follow_entry() {
        let errors = validate_on("worklog", &worklog("17:00", "09:00"), day());
        assert_eq!(errors["exit_time"], "Exit time must be after entry time");

        let errors = validate_on("worklog", &worklog("09:00", "09:00"), day());
        assert!(errors.contains_key("exit_time"));
    }

    #[test]
    fn test_worklog_time_order_checked_even_with_bad_date() {
        let mut f = worklog("17:00", "09:00");
        f.insert("log_date".to_string(), "yesterday".to_string());
        let errors = validate_on("worklog", &f, day());
        assert_eq!(errors["log_date"], "Invalid date format");
        assert_eq!(errors["exit_time"], "Exit time must be after entry time");
    }

    #[test]
    fn test_worklog_future_date_rejected() {
        let mut f = worklog("09:00", "17:00");
        f.insert("log_date".to_string(), "2024-06-16".to_string());
        assert_eq!(
            validate_on("worklog", &f, day())["log_date"],
            "Work log date cannot be in the future"
        );
    }

    #[test]
    fn test_worklog_lunch_duration() {
        let mut f = worklog("09:00", "17:00");
        f.remove("lunch_duration");
        let ValidForm::WorkLog(log) = parse_form(FormType::WorkLog, &f, day()).unwrap() else {
            panic!("expected a work log");
        };
        assert_eq!(log.lunch_duration, 0);

        f.insert("lunch_duration".to_string(), "-5".to_string());
        assert_eq!(
            validate_on("worklog", &f, day())["lunch_duration"],
            "Lunch duration cannot be negative"
        );
        f.insert("lunch_duration".to_string(), "half an hour".to_string());
        assert_eq!(
            validate_on("worklog", &f, day())["lunch_duration"],
            "Lunch duration must be a valid number"
        );
    }

    #[test]
    fn test_worklog_bad_time_format() {
        let errors = validate_on("worklog", &worklog("9am", "17:00"), day());
        assert_eq!(errors["entry_time"], "Invalid time format");
        assert!(!errors.contains_key("exit_time"));
    }

    #[test]
    fn test_payment_check_requires_number() {
        let mut f = fields(&[
            ("employee_id", "3"),
            ("amount", "400"),
            ("payment_method", "check"),
            ("payment_date", "2024-06-10"),
        ]);
        assert_eq!(
            validate_on("payment", &f, day())["check_number"],
            "Check number is required for check payments"
        );

        f.insert("check_number".to_string(), "1234".to_string());
        assert!(!validate_on("payment", &f, day()).contains_key("check_number"));
        assert!(validate_on("payment", &f, day()).is_empty());
    }

    #[test]
    fn test_payment_method_is_canonicalised() {
        let f = fields(&[
            ("employee_id", "3"),
            ("amount", "400"),
            ("payment_method", "Direct Deposit"),
            ("payment_date", "2024-06-10"),
        ]);
        let ValidForm::Payment(p) = parse_form(FormType::Payment, &f, day()).unwrap() else {
            panic!("expected a payment");
        };
        assert_eq!(p.payment_method, PaymentMethod::DirectDeposit);
        assert_eq!(p.payment_method.as_str(), "direct deposit");
    }

    #[test]
    fn test_payment_rejects_unknown_method_and_future_date() {
        let f = fields(&[
            ("employee_id", "3"),
            ("amount", "400"),
            ("payment_method", "credit card"),
            ("payment_date", "2030-01-01"),
        ]);
        let errors = validate_on("payment", &f, day());
        assert_eq!(errors["payment_method"], "Invalid payment method");
        assert_eq!(errors["payment_date"], "Payment date cannot be in the future");
        assert!(!errors.contains_key("check_number"));
    }

    #[test]
    fn test_project_end_before_start() {
        let f = fields(&[
            ("name", "Garage"),
            ("value", "12000"),
            ("start_date", "2024-05-01"),
            ("end_date", "2024-04-30"),
        ]);
        assert_eq!(
            validate_on("project", &f, day())["end_date"],
            "End date cannot be before start date"
        );
    }

    #[test]
    fn test_project_end_date_optional() {
        let f = fields(&[
            ("name", "Garage"),
            ("value", "12000"),
            ("start_date", "2024-05-01"),
            ("end_date", ""),
        ]);
        let ValidForm::Project(p) = parse_form(FormType::Project, &f, day()).unwrap() else {
            panic!("expected a project");
        };
        assert_eq!(p.end_date, None);
    }

    #[test]
    fn test_project_cost_type_membership() {
        let f = fields(&[
            ("project_id", "1"),
            ("cost_type", "equipment"),
            ("description", "Excavator rental"),
            ("amount", "800"),
        ]);
        assert_eq!(
            validate_on("project_cost", &f, day())["cost_type"],
            "Invalid cost type"
        );
    }

    #[test]
    fn test_description_length_ceiling() {
        let long = "d".repeat(201);
        let f = fields(&[
            ("project_id", "1"),
            ("cost_type", "material"),
            ("description", &long),
            ("amount", "800"),
        ]);
        assert_eq!(
            validate_on("project_cost", &f, day())["description"],
            "Description is too long (maximum 200 characters)"
        );
    }

    #[test]
    fn test_invoice_requires_project() {
        let f = fields(&[("amount_charged", "5000"), ("invoice_date", "2024-06-01")]);
        assert_eq!(
            validate_on("invoice", &f, day())["project_id"],
            "Project is required"
        );
        let f = fields(&[
            ("project_id", "abc"),
            ("amount_charged", "5000"),
            ("invoice_date", "2024-06-01"),
        ]);
        assert_eq!(
            validate_on("invoice", &f, day())["project_id"],
            "Project must be a valid selection"
        );
    }

    #[test]
    fn test_accounts_payable_rules() {
        let mut f = fields(&[
            ("supplier", "Concrete Co"),
            ("description", "Ready-mix"),
            ("amount", "2300"),
            ("due_date", "2024-07-01"),
            ("invoice_date", "2024-07-05"),
            ("payment_method", "check"),
            ("category", "materials"),
            ("status", "overdue"),
        ]);
        let errors = validate_on("accounts_payable", &f, day());
        assert_eq!(errors["invoice_date"], "Invoice date cannot be after due date");
        assert_eq!(errors["status"], "Invalid status");
        // check number is a payment-time detail, not required on a bill
        assert!(!errors.contains_key("check_number"));

        f.insert("invoice_date".to_string(), "2024-06-01".to_string());
        f.insert("status".to_string(), "pending".to_string());
        assert!(validate_on("accounts_payable", &f, day()).is_empty());
    }

    #[test]
    fn test_paid_account_check_requires_number() {
        let f = fields(&[
            ("supplier", "Lumber Yard"),
            ("amount_paid", "950"),
            ("payment_date", "2024-06-01"),
            ("payment_method", "CHECK"),
        ]);
        assert_eq!(
            validate_on("paid_account", &f, day())["check_number"],
            "Check number is required for check payments"
        );
    }

    #[test]
    fn test_expense_valid_and_missing_fields() {
        let f = fields(&[
            ("description", "Diesel"),
            ("amount", "120.40"),
            ("expense_date", "2024-06-03"),
            ("category", "fuel"),
            ("payment_method", "cash"),
        ]);
        assert!(validate_on("expense", &f, day()).is_empty());

        let errors = validate_on("expense", &FormFields::new(), day());
        assert_eq!(errors["description"], "Description is required");
        assert_eq!(errors["amount"], "Expense amount is required");
        assert_eq!(errors["expense_date"], "Expense date is required");
        assert_eq!(errors["category"], "Expense category is required");
        assert_eq!(errors["payment_method"], "Payment method is required");
    }

    #[test]
    fn test_expense_date_cannot_be_in_the_future() {
        let mut f = fields(&[
            ("description", "Diesel"),
            ("amount", "120.40"),
            ("expense_date", "2024-06-16"),
            ("category", "fuel"),
            ("payment_method", "cash"),
        ]);
        assert_eq!(
            validate_on("expense", &f, day())["expense_date"],
            "Expense date cannot be in the future"
        );

        f.insert("expense_date".to_string(), "2024-06-15".to_string());
        assert!(validate_on("expense", &f, day()).is_empty());
    }

    #[test]
    fn test_form_type_round_trips_through_str() {
        for form_type in FormType::ALL {
            assert_eq!(form_type.as_str().parse::<FormType>().unwrap(), form_type);
        }
        assert!("Employee".parse::<FormType>().is_err());
    }
}
