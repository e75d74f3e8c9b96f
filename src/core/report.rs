//! Report generation business logic.
//!
//! This module builds the read-only summaries shown on the reports page and the
//! dashboard. All functions are framework-agnostic and return serialisable data
//! that the web layer hands to the renderer unchanged.
//!
//! Date-bounded reports take an inclusive [`DateRange`]; when the caller supplies no
//! bounds the current calendar month is used (see [`resolve_range`]). Project reports
//! always use every cost ever booked, while `project_billing` restricts invoices to the
//! range and `project_profit` uses every invoice.

use crate::{
    core::{
        employee::get_all_employees,
        financials::{get_expenses, get_paid_accounts, get_pending_payables},
        invoice::{get_all_invoice_rows, get_invoices_in_range, get_recent_invoices},
        payroll::{PaymentEntry, get_payments_in_range, get_recent_payments},
        period::{DateRange, month_bounds, parse_iso_date},
        project::{ProjectWithCosts, get_active_projects, get_projects_with_costs},
        validation::{CostType, PaymentMethod},
        work_log::get_work_logs_in_range,
    },
    entities::{accounts_payable, employee, expense, invoice, paid_account, project},
    errors::{Error, Result},
};
use chrono::{Datelike, Days, NaiveDate};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Rows shown in each dashboard list.
pub const DASHBOARD_LIST_LIMIT: u64 = 5;

/// How far ahead the dashboard looks for payables coming due.
pub const UPCOMING_WINDOW_DAYS: u64 = 30;

/// Entries kept in the dashboard's recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// The reports the reports page can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Payroll,
    PaymentMethod,
    HoursWorked,
    ProjectBilling,
    ProjectCost,
    ProjectProfit,
    AccountsPayable,
    PaidAccounts,
    MonthlyExpense,
    PaidByMethod,
    PaymentForecast,
}

impl ReportType {
    /// Every report, in menu order.
    pub const ALL: [Self; 11] = [
        Self::Payroll,
        Self::PaymentMethod,
        Self::HoursWorked,
        Self::ProjectBilling,
        Self::ProjectCost,
        Self::ProjectProfit,
        Self::AccountsPayable,
        Self::PaidAccounts,
        Self::MonthlyExpense,
        Self::PaidByMethod,
        Self::PaymentForecast,
    ];

    /// The `report_type` query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payroll => "payroll",
            Self::PaymentMethod => "payment_method",
            Self::HoursWorked => "hours_worked",
            Self::ProjectBilling => "project_billing",
            Self::ProjectCost => "project_cost",
            Self::ProjectProfit => "project_profit",
            Self::AccountsPayable => "accounts_payable",
            Self::PaidAccounts => "paid_accounts",
            Self::MonthlyExpense => "monthly_expense",
            Self::PaidByMethod => "paid_by_method",
            Self::PaymentForecast => "payment_forecast",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::bad_request(format!("Unknown report type: {s}")))
    }
}

/// Hours one employee worked in the range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeHours {
    pub employee: employee::Model,
    pub total_hours: f64,
}

/// Invoiced amount in the range against all-time costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBilling {
    pub project: project::Model,
    pub total_invoiced: f64,
    pub total_costs: f64,
    pub profit: f64,
}

/// All-time costs of one project split by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCosts {
    pub project: project::Model,
    pub material_costs: f64,
    pub employee_costs: f64,
    pub total_costs: f64,
}

/// All-time margin of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectProfit {
    pub project: project::Model,
    pub total_invoiced: f64,
    pub total_costs: f64,
    pub profit_margin: f64,
    /// Margin as a percentage of the invoiced amount; 0 when nothing was invoiced
    pub profit_percentage: f64,
}

/// Data for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Payroll {
        payments: Vec<PaymentEntry>,
        total: f64,
    },
    /// Totals keyed by payment method; every method is present
    PaymentMethod {
        totals: BTreeMap<String, f64>,
        total: f64,
    },
    HoursWorked {
        hours_data: Vec<EmployeeHours>,
    },
    ProjectBilling {
        billing_data: Vec<ProjectBilling>,
    },
    ProjectCost {
        cost_data: Vec<ProjectCosts>,
    },
    ProjectProfit {
        profit_data: Vec<ProjectProfit>,
    },
    AccountsPayable {
        payables: Vec<accounts_payable::Model>,
        total: f64,
    },
    PaidAccounts {
        paid_accounts: Vec<paid_account::Model>,
        total: f64,
    },
    MonthlyExpense {
        expenses: Vec<expense::Model>,
        categories: BTreeMap<String, f64>,
        total: f64,
    },
    PaidByMethod {
        methods: BTreeMap<String, f64>,
        total: f64,
    },
    /// Pending payables grouped by `YYYY-MM` of their due date
    PaymentForecast {
        payables: Vec<accounts_payable::Model>,
        forecast: BTreeMap<String, f64>,
        total: f64,
    },
}

/// The reports page: the selected report (if any) over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    pub report_type: Option<ReportType>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report_data: Option<ReportData>,
}

/// Resolves optional `start_date` / `end_date` query values into a range.
///
/// Missing or blank bounds default to the calendar month containing `today`.
///
/// # Errors
/// [`Error::BadRequest`] when a bound is not a `YYYY-MM-DD` date or the range is inverted.
pub fn resolve_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    today: NaiveDate,
) -> Result<DateRange> {
    let month = month_bounds(today);
    let parse = |value: Option<&str>, name: &str, default: NaiveDate| -> Result<NaiveDate> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(default),
            Some(v) => parse_iso_date(v)
                .ok_or_else(|| Error::bad_request(format!("Invalid {name}: {v}"))),
        }
    };
    let range = DateRange {
        start: parse(start_date, "start_date", month.start)?,
        end: parse(end_date, "end_date", month.end)?,
    };
    if range.start > range.end {
        return Err(Error::bad_request(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok(range)
}

/// Builds the reports page for an optional `report_type` query value.
///
/// An absent or blank `report_type` yields a page without data.
#[instrument(skip(db))]
pub async fn build_report_page<C: ConnectionTrait>(
    db: &C,
    report_type: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    today: NaiveDate,
) -> Result<ReportPage> {
    let range = resolve_range(start_date, end_date, today)?;
    let report_type = report_type
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::parse::<ReportType>)
        .transpose()?;

    let report_data = match report_type {
        Some(report_type) => Some(generate_report(db, report_type, range).await?),
        None => None,
    };

    Ok(ReportPage {
        report_type,
        start_date: range.start,
        end_date: range.end,
        report_data,
    })
}

/// Generates one report over `range`.
#[instrument(skip(db))]
pub async fn generate_report<C: ConnectionTrait>(
    db: &C,
    report_type: ReportType,
    range: DateRange,
) -> Result<ReportData> {
    let data = match report_type {
        ReportType::Payroll => {
            let payments = get_payments_in_range(db, range).await?;
            let total = payments.iter().map(|p| p.payment.amount).sum();
            ReportData::Payroll { payments, total }
        }
        ReportType::PaymentMethod => {
            let payments = get_payments_in_range(db, range).await?;
            let totals = totals_by_method(
                payments
                    .iter()
                    .map(|p| (p.payment.payment_method.as_str(), p.payment.amount)),
            );
            let total = totals.values().sum();
            ReportData::PaymentMethod { totals, total }
        }
        ReportType::HoursWorked => ReportData::HoursWorked {
            hours_data: hours_worked(db, range).await?,
        },
        ReportType::ProjectBilling => {
            let invoices = get_invoices_in_range(db, range).await?;
            let invoiced = invoiced_by_project(&invoices);
            let billing_data = get_projects_with_costs(db)
                .await?
                .into_iter()
                .map(|p| {
                    let total_invoiced = invoiced.get(&p.project.id).copied().unwrap_or(0.0);
                    ProjectBilling {
                        total_invoiced,
                        total_costs: p.total_costs,
                        profit: total_invoiced - p.total_costs,
                        project: p.project,
                    }
                })
                .collect();
            ReportData::ProjectBilling { billing_data }
        }
        ReportType::ProjectCost => {
            let cost_data = get_projects_with_costs(db)
                .await?
                .into_iter()
                .map(|p| {
                    let material_costs = p.costs_of(CostType::Material);
                    let employee_costs = p.costs_of(CostType::Employee);
                    ProjectCosts {
                        project: p.project,
                        material_costs,
                        employee_costs,
                        total_costs: material_costs + employee_costs,
                    }
                })
                .collect();
            ReportData::ProjectCost { cost_data }
        }
        ReportType::ProjectProfit => {
            let invoices = get_all_invoice_rows(db).await?;
            let invoiced = invoiced_by_project(&invoices);
            let profit_data = get_projects_with_costs(db)
                .await?
                .into_iter()
                .map(|p| project_profit(p, &invoiced))
                .collect();
            ReportData::ProjectProfit { profit_data }
        }
        ReportType::AccountsPayable => {
            let payables = get_pending_payables(db, Some(range), None).await?;
            let total = payables.iter().map(|p| p.amount).sum();
            ReportData::AccountsPayable { payables, total }
        }
        ReportType::PaidAccounts => {
            let mut paid_accounts = get_paid_accounts(db, Some(range), None).await?;
            paid_accounts.reverse();
            let total = paid_accounts.iter().map(|p| p.amount_paid).sum();
            ReportData::PaidAccounts {
                paid_accounts,
                total,
            }
        }
        ReportType::MonthlyExpense => {
            let mut expenses = get_expenses(db, Some(range), None).await?;
            expenses.reverse();
            let mut categories = BTreeMap::new();
            for e in &expenses {
                *categories.entry(e.category.clone()).or_insert(0.0) += e.amount;
            }
            let total = expenses.iter().map(|e| e.amount).sum();
            ReportData::MonthlyExpense {
                expenses,
                categories,
                total,
            }
        }
        ReportType::PaidByMethod => {
            let paid = get_paid_accounts(db, Some(range), None).await?;
            let methods = totals_by_method(
                paid.iter()
                    .map(|p| (p.payment_method.as_str(), p.amount_paid)),
            );
            let total = methods.values().sum();
            ReportData::PaidByMethod { methods, total }
        }
        ReportType::PaymentForecast => {
            let payables = get_pending_payables(db, None, None).await?;
            let mut forecast = BTreeMap::new();
            for p in &payables {
                let month = format!("{}-{:02}", p.due_date.year(), p.due_date.month());
                *forecast.entry(month).or_insert(0.0) += p.amount;
            }
            let total = payables.iter().map(|p| p.amount).sum();
            ReportData::PaymentForecast {
                payables,
                forecast,
                total,
            }
        }
    };
    Ok(data)
}

/// Sums amounts per payment method, listing every canonical method even when zero.
fn totals_by_method<'a>(rows: impl Iterator<Item = (&'a str, f64)>) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = PaymentMethod::ALL
        .iter()
        .map(|m| (m.as_str().to_string(), 0.0))
        .collect();
    for (method, amount) in rows {
        *totals.entry(method.to_string()).or_insert(0.0) += amount;
    }
    totals
}

fn invoiced_by_project(invoices: &[invoice::Model]) -> HashMap<i64, f64> {
    let mut invoiced = HashMap::new();
    for invoice in invoices {
        *invoiced.entry(invoice.project_id).or_insert(0.0) += invoice.amount_charged;
    }
    invoiced
}

fn project_profit(p: ProjectWithCosts, invoiced: &HashMap<i64, f64>) -> ProjectProfit {
    let total_invoiced = invoiced.get(&p.project.id).copied().unwrap_or(0.0);
    let profit_margin = total_invoiced - p.total_costs;
    let profit_percentage = if total_invoiced > 0.0 {
        profit_margin / total_invoiced * 100.0
    } else {
        0.0
    };
    ProjectProfit {
        project: p.project,
        total_invoiced,
        total_costs: p.total_costs,
        profit_margin,
        profit_percentage,
    }
}

async fn hours_worked<C: ConnectionTrait>(db: &C, range: DateRange) -> Result<Vec<EmployeeHours>> {
    let mut hours: HashMap<i64, f64> = HashMap::new();
    for log in get_work_logs_in_range(db, range).await? {
        *hours.entry(log.employee_id).or_insert(0.0) += log.hours_worked();
    }
    Ok(get_all_employees(db)
        .await?
        .into_iter()
        .map(|employee| EmployeeHours {
            total_hours: hours.get(&employee.id).copied().unwrap_or(0.0),
            employee,
        })
        .collect())
}

/// What kind of money movement a dashboard activity line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Payment,
    Invoice,
    Expense,
    PaidAccount,
}

/// One line of the dashboard's recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

/// Everything shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// The calendar month the totals cover
    pub month: DateRange,
    pub payroll_total: f64,
    pub invoice_total: f64,
    pub expense_total: f64,
    /// Pending payables due within the next [`UPCOMING_WINDOW_DAYS`] days
    pub upcoming_payables: Vec<accounts_payable::Model>,
    pub active_projects: Vec<project::Model>,
    pub recent_activity: Vec<Activity>,
}

/// Builds the dashboard as of `today`.
#[instrument(skip(db))]
pub async fn build_dashboard<C: ConnectionTrait>(
    db: &C,
    today: NaiveDate,
) -> Result<DashboardSummary> {
    let month = month_bounds(today);

    let payroll_total = get_payments_in_range(db, month)
        .await?
        .iter()
        .map(|p| p.payment.amount)
        .sum();
    let invoice_total = get_invoices_in_range(db, month)
        .await?
        .iter()
        .map(|i| i.amount_charged)
        .sum();
    let expense_total = get_expenses(db, Some(month), None)
        .await?
        .iter()
        .map(|e| e.amount)
        .sum();

    let upcoming = DateRange {
        start: today,
        end: today
            .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
            .unwrap_or(today),
    };
    let upcoming_payables =
        get_pending_payables(db, Some(upcoming), Some(DASHBOARD_LIST_LIMIT)).await?;
    let active_projects = get_active_projects(db, today, DASHBOARD_LIST_LIMIT).await?;

    Ok(DashboardSummary {
        month,
        payroll_total,
        invoice_total,
        expense_total,
        upcoming_payables,
        active_projects,
        recent_activity: recent_activity(db).await?,
    })
}

/// The newest entries across payments, invoices, expenses and paid accounts.
async fn recent_activity<C: ConnectionTrait>(db: &C) -> Result<Vec<Activity>> {
    let mut activity = Vec::new();

    for p in get_recent_payments(db, DASHBOARD_LIST_LIMIT).await? {
        activity.push(Activity {
            kind: ActivityKind::Payment,
            date: p.payment.payment_date,
            description: format!("Payment to {}", p.employee_name),
            amount: p.payment.amount,
        });
    }
    for i in get_recent_invoices(db, DASHBOARD_LIST_LIMIT).await? {
        activity.push(Activity {
            kind: ActivityKind::Invoice,
            date: i.invoice.invoice_date,
            description: format!("Invoice for {}", i.project_name),
            amount: i.invoice.amount_charged,
        });
    }
    for e in get_expenses(db, None, Some(DASHBOARD_LIST_LIMIT)).await? {
        activity.push(Activity {
            kind: ActivityKind::Expense,
            date: e.expense_date,
            description: e.description,
            amount: e.amount,
        });
    }
    for a in get_paid_accounts(db, None, Some(DASHBOARD_LIST_LIMIT)).await? {
        activity.push(Activity {
            kind: ActivityKind::PaidAccount,
            date: a.payment_date,
            description: format!("Payment to {}", a.supplier),
            amount: a.amount_paid,
        });
    }

    // stable sort keeps source order among entries of the same day
    activity.sort_by(|a, b| b.date.cmp(&a.date));
    activity.truncate(RECENT_ACTIVITY_LIMIT);
    Ok(activity)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::validation::PayableStatus;
    use crate::test_utils::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn march() -> DateRange {
        DateRange {
            start: date("2024-03-01"),
            end: date("2024-03-31"),
        }
    }

    #[test]
    fn test_resolve_range_defaults_to_month() {
        let range = resolve_range(None, Some(""), date("2024-02-10")).unwrap();
        assert_eq!(range.start, date("2024-02-01"));
        assert_eq!(range.end, date("2024-02-29"));
    }

    #[test]
    fn test_resolve_range_rejects_bad_input() {
        assert!(matches!(
            resolve_range(Some("March"), None, date("2024-03-10")),
            Err(Error::BadRequest { .. })
        ));
        assert!(matches!(
            resolve_range(Some("2024-03-10"), Some("2024-03-01"), date("2024-03-10")),
            Err(Error::BadRequest { .. })
        ));
    }

    #[test]
    fn test_report_type_parsing() {
        for report in ReportType::ALL {
            assert_eq!(report.as_str().parse::<ReportType>().unwrap(), report);
        }
        assert!(matches!(
            "profit".parse::<ReportType>(),
            Err(Error::BadRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_payroll_and_payment_method_reports() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana").await?;
        create_test_payment(&db, ana.id, 100.0, "2024-03-05").await?;
        create_test_payment(&db, ana.id, 50.0, "2024-03-20").await?;
        create_test_payment(&db, ana.id, 999.0, "2024-04-01").await?;

        let ReportData::Payroll { payments, total } =
            generate_report(&db, ReportType::Payroll, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(payments.len(), 2);
        assert_eq!(total, 150.0);

        let ReportData::PaymentMethod { totals, total } =
            generate_report(&db, ReportType::PaymentMethod, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(totals["cash"], 150.0);
        assert_eq!(totals["check"], 0.0);
        assert_eq!(totals["direct deposit"], 0.0);
        assert_eq!(total, 150.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_hours_worked_report() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_employee(&db, "Ana").await?;
        create_test_employee(&db, "Ben").await?;
        create_test_work_log(&db, ana.id, "2024-03-04").await?;
        create_test_work_log(&db, ana.id, "2024-03-05").await?;

        let ReportData::HoursWorked { hours_data } =
            generate_report(&db, ReportType::HoursWorked, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(hours_data.len(), 2);
        assert_eq!(hours_data[0].employee.name, "Ana");
        assert_eq!(hours_data[0].total_hours, 16.0);
        assert_eq!(hours_data[1].total_hours, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_project_reports() -> Result<()> {
        let db = setup_test_db().await?;
        let garage = create_test_project(&db, "Garage", "2024-01-01").await?;
        let deck = create_test_project(&db, "Deck", "2024-02-01").await?;
        create_test_cost(&db, garage.id, CostType::Material, 600.0).await?;
        create_test_cost(&db, garage.id, CostType::Employee, 400.0).await?;
        create_test_invoice(&db, garage.id, 1500.0, "2024-03-10").await?;
        create_test_invoice(&db, garage.id, 500.0, "2024-01-10").await?;

        let ReportData::ProjectBilling { billing_data } =
            generate_report(&db, ReportType::ProjectBilling, march()).await?
        else {
            panic!("wrong report");
        };
        let garage_billing = billing_data
            .iter()
            .find(|b| b.project.id == garage.id)
            .unwrap();
        assert_eq!(garage_billing.total_invoiced, 1500.0);
        assert_eq!(garage_billing.profit, 500.0);

        let ReportData::ProjectCost { cost_data } =
            generate_report(&db, ReportType::ProjectCost, march()).await?
        else {
            panic!("wrong report");
        };
        let garage_costs = cost_data.iter().find(|c| c.project.id == garage.id).unwrap();
        assert_eq!(garage_costs.material_costs, 600.0);
        assert_eq!(garage_costs.employee_costs, 400.0);
        assert_eq!(garage_costs.total_costs, 1000.0);

        let ReportData::ProjectProfit { profit_data } =
            generate_report(&db, ReportType::ProjectProfit, march()).await?
        else {
            panic!("wrong report");
        };
        let garage_profit = profit_data
            .iter()
            .find(|p| p.project.id == garage.id)
            .unwrap();
        assert_eq!(garage_profit.total_invoiced, 2000.0);
        assert_eq!(garage_profit.profit_margin, 1000.0);
        assert_eq!(garage_profit.profit_percentage, 50.0);
        let deck_profit = profit_data.iter().find(|p| p.project.id == deck.id).unwrap();
        assert_eq!(deck_profit.profit_percentage, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_financial_reports() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_payable(&db, "Concrete Co", 500.0, "2024-03-20", PayableStatus::Pending)
            .await?;
        create_test_payable(&db, "Steel Inc", 250.0, "2024-04-02", PayableStatus::Pending)
            .await?;
        create_test_payable(&db, "Paid Ltd", 75.0, "2024-03-05", PayableStatus::Paid).await?;
        create_test_paid_account(&db, "Lumber Yard", 120.0, "2024-03-02").await?;
        create_test_paid_account(&db, "Concrete Co", 80.0, "2024-03-12").await?;
        create_test_expense(&db, "fuel", 40.0, "2024-03-10").await?;
        create_test_expense(&db, "fuel", 10.0, "2024-03-11").await?;
        create_test_expense(&db, "tools", 60.0, "2024-03-20").await?;

        let ReportData::AccountsPayable { payables, total } =
            generate_report(&db, ReportType::AccountsPayable, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(payables.len(), 1);
        assert_eq!(total, 500.0);

        let ReportData::PaidAccounts {
            paid_accounts,
            total,
        } = generate_report(&db, ReportType::PaidAccounts, march()).await?
        else {
            panic!("wrong report");
        };
        // oldest first
        assert_eq!(paid_accounts[0].supplier, "Lumber Yard");
        assert_eq!(total, 200.0);

        let ReportData::MonthlyExpense {
            categories, total, ..
        } = generate_report(&db, ReportType::MonthlyExpense, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(categories["fuel"], 50.0);
        assert_eq!(categories["tools"], 60.0);
        assert_eq!(total, 110.0);

        let ReportData::PaidByMethod { methods, total } =
            generate_report(&db, ReportType::PaidByMethod, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(methods["cash"], 200.0);
        assert_eq!(total, 200.0);

        let ReportData::PaymentForecast {
            forecast, total, ..
        } = generate_report(&db, ReportType::PaymentForecast, march()).await?
        else {
            panic!("wrong report");
        };
        assert_eq!(forecast["2024-03"], 500.0);
        assert_eq!(forecast["2024-04"], 250.0);
        assert_eq!(total, 750.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_report_page_without_type_has_no_data() -> Result<()> {
        let db = setup_test_db().await?;
        let page = build_report_page(&db, None, None, None, date("2024-03-15")).await?;
        assert_eq!(page.report_type, None);
        assert_eq!(page.report_data, None);
        assert_eq!(page.start_date, date("2024-03-01"));
        assert_eq!(page.end_date, date("2024-03-31"));

        let result =
            build_report_page(&db, Some("bogus"), None, None, date("2024-03-15")).await;
        assert!(matches!(result, Err(Error::BadRequest { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date("2024-03-15");
        let ana = create_test_employee(&db, "Ana").await?;
        let garage = create_test_project(&db, "Garage", "2024-01-01").await?;
        create_test_payment(&db, ana.id, 300.0, "2024-03-08").await?;
        create_test_payment(&db, ana.id, 200.0, "2024-02-23").await?;
        create_test_invoice(&db, garage.id, 4000.0, "2024-03-01").await?;
        create_test_expense(&db, "fuel", 60.0, "2024-03-14").await?;
        create_test_payable(&db, "Concrete Co", 500.0, "2024-03-20", PayableStatus::Pending)
            .await?;
        create_test_payable(&db, "Far Future", 500.0, "2024-05-20", PayableStatus::Pending)
            .await?;
        create_test_payable(&db, "Overdue", 500.0, "2024-03-01", PayableStatus::Pending)
            .await?;

        let dashboard = build_dashboard(&db, today).await?;
        assert_eq!(dashboard.payroll_total, 300.0);
        assert_eq!(dashboard.invoice_total, 4000.0);
        assert_eq!(dashboard.expense_total, 60.0);
        assert_eq!(dashboard.upcoming_payables.len(), 1);
        assert_eq!(dashboard.upcoming_payables[0].supplier, "Concrete Co");
        assert_eq!(dashboard.active_projects.len(), 1);

        let feed = &dashboard.recent_activity;
        assert_eq!(feed.len(), 4);
        assert_eq!(feed[0].kind, ActivityKind::Expense);
        assert_eq!(feed[1].description, "Payment to Ana");
        assert_eq!(feed[2].description, "Invoice for Garage");
        assert_eq!(feed[3].date, date("2024-02-23"));
        Ok(())
    }
}
