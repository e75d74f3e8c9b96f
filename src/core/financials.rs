//! Financial records - Accounts payable, paid accounts and general expenses.
//!
//! None of these rows reference another table, so they can always be deleted.

use crate::{
    core::{
        period::DateRange,
        validation::{AccountsPayableForm, ExpenseForm, PaidAccountForm, PayableStatus},
    },
    entities::{AccountsPayable, Expense, PaidAccount, accounts_payable, expense, paid_account},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, QuerySelect, Set, prelude::*};
use tracing::instrument;

/// Every payable, soonest due first.
pub async fn get_all_payables<C: ConnectionTrait>(db: &C) -> Result<Vec<accounts_payable::Model>> {
    AccountsPayable::find()
        .order_by_asc(accounts_payable::Column::DueDate)
        .order_by_asc(accounts_payable::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Pending payables, soonest due first, optionally restricted to a due-date range.
pub async fn get_pending_payables<C: ConnectionTrait>(
    db: &C,
    due: Option<DateRange>,
    limit: Option<u64>,
) -> Result<Vec<accounts_payable::Model>> {
    let mut query = AccountsPayable::find()
        .filter(accounts_payable::Column::Status.eq(PayableStatus::Pending.as_str()));
    if let Some(range) = due {
        query = query.filter(accounts_payable::Column::DueDate.between(range.start, range.end));
    }
    query
        .order_by_asc(accounts_payable::Column::DueDate)
        .order_by_asc(accounts_payable::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records or overwrites an account payable.
#[instrument(skip(db))]
pub async fn save_payable<C: ConnectionTrait>(
    db: &C,
    form: &AccountsPayableForm,
    existing_id: Option<i64>,
) -> Result<accounts_payable::Model> {
    let mut model = match existing_id {
        Some(id) => AccountsPayable::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "Account payable",
                id,
            })?
            .into_active_model(),
        None => accounts_payable::ActiveModel {
            ..Default::default()
        },
    };
    model.supplier = Set(form.supplier.clone());
    model.description = Set(form.description.clone());
    model.amount = Set(form.amount);
    model.due_date = Set(form.due_date);
    model.invoice_date = Set(form.invoice_date);
    model.payment_method = Set(form.payment_method.as_str().to_string());
    model.category = Set(form.category.clone());
    model.status = Set(form.status.as_str().to_string());
    model.notes = Set(form.notes.clone());

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes a payable. Returns false when nothing matched.
pub async fn delete_payable<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = AccountsPayable::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Paid accounts, newest first, optionally restricted to a payment-date range and count.
pub async fn get_paid_accounts<C: ConnectionTrait>(
    db: &C,
    paid: Option<DateRange>,
    limit: Option<u64>,
) -> Result<Vec<paid_account::Model>> {
    let mut query = PaidAccount::find();
    if let Some(range) = paid {
        query = query.filter(paid_account::Column::PaymentDate.between(range.start, range.end));
    }
    query
        .order_by_desc(paid_account::Column::PaymentDate)
        .order_by_desc(paid_account::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records or overwrites a paid account.
#[instrument(skip(db))]
pub async fn save_paid_account<C: ConnectionTrait>(
    db: &C,
    form: &PaidAccountForm,
    existing_id: Option<i64>,
) -> Result<paid_account::Model> {
    let mut model = match existing_id {
        Some(id) => PaidAccount::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "Paid account",
                id,
            })?
            .into_active_model(),
        None => paid_account::ActiveModel {
            ..Default::default()
        },
    };
    model.supplier = Set(form.supplier.clone());
    model.amount_paid = Set(form.amount_paid);
    model.payment_date = Set(form.payment_date);
    model.payment_method = Set(form.payment_method.as_str().to_string());
    model.check_number = Set(form.check_number.clone());
    model.check_bank = Set(form.check_bank.clone());
    model.payment_proof = Set(form.payment_proof.clone());
    model.notes = Set(form.notes.clone());

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes a paid account. Returns false when nothing matched.
pub async fn delete_paid_account<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = PaidAccount::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Expenses, newest first, optionally restricted to a date range and count.
pub async fn get_expenses<C: ConnectionTrait>(
    db: &C,
    spent: Option<DateRange>,
    limit: Option<u64>,
) -> Result<Vec<expense::Model>> {
    let mut query = Expense::find();
    if let Some(range) = spent {
        query = query.filter(expense::Column::ExpenseDate.between(range.start, range.end));
    }
    query
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records or overwrites an expense.
#[instrument(skip(db))]
pub async fn save_expense<C: ConnectionTrait>(
    db: &C,
    form: &ExpenseForm,
    existing_id: Option<i64>,
) -> Result<expense::Model> {
    let mut model = match existing_id {
        Some(id) => Expense::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NotFound {
                entity: "Expense",
                id,
            })?
            .into_active_model(),
        None => expense::ActiveModel {
            ..Default::default()
        },
    };
    model.description = Set(form.description.clone());
    model.amount = Set(form.amount);
    model.expense_date = Set(form.expense_date);
    model.category = Set(form.category.clone());
    model.payment_method = Set(form.payment_method.as_str().to_string());
    model.notes = Set(form.notes.clone());

    if existing_id.is_some() {
        model.update(db).await.map_err(Into::into)
    } else {
        model.insert(db).await.map_err(Into::into)
    }
}

/// Deletes an expense. Returns false when nothing matched.
pub async fn delete_expense<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool> {
    let result = Expense::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
