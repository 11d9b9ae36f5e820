//! CSV format handling for ledger records and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger records
//! - Settlement and balance report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::cli::ReportKind;
use crate::core::summary::GroupReport;
use crate::types::{Expense, LedgerRecord, Member, SettleError};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Separator between ids in `split_with` and amounts in `split_amounts`
pub const LIST_SEPARATOR: char = ';';

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// type, group, id, name, amount, paid_by, split_with, split_amounts, date
///
/// Only `type` and `group` are shared by every record type, so all other
/// columns are optional here and checked during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub group: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<String>,
    pub paid_by: Option<String>,
    pub split_with: Option<String>,
    pub split_amounts: Option<String>,
    pub date: Option<String>,
}

/// Convert a CsvRecord to a LedgerRecord
///
/// This function:
/// - Parses the record type (case-insensitive)
/// - Checks that the columns required by that type are present
/// - Parses amounts, participant lists and dates
///
/// Expense consistency (known members, split sums) is not checked here; the
/// group does that when the record is applied.
///
/// # Errors
///
/// Returns `SettleError::InvalidRecord` describing the first problem found.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerRecord, SettleError> {
    let record_type = csv_record.record_type.trim().to_lowercase();
    let group = csv_record.group.trim().to_string();
    if group.is_empty() {
        return Err(SettleError::invalid_record(format!(
            "{} record without a group",
            record_type
        )));
    }

    let id = required(csv_record.id.clone(), "id", &record_type)?;

    match record_type.as_str() {
        "member" => {
            let name = required(csv_record.name, "name", &record_type)?;
            Ok(LedgerRecord::AddMember {
                group,
                member: Member::new(id, name),
            })
        }
        "rename_member" => {
            let name = required(csv_record.name, "name", &record_type)?;
            Ok(LedgerRecord::RenameMember {
                group,
                member: id,
                name,
            })
        }
        "remove_member" => Ok(LedgerRecord::RemoveMember { group, member: id }),
        "expense" => Ok(LedgerRecord::AddExpense {
            group,
            expense: parse_expense(id, csv_record)?,
        }),
        "edit_expense" => Ok(LedgerRecord::EditExpense {
            group,
            expense: parse_expense(id, csv_record)?,
        }),
        "delete_expense" => Ok(LedgerRecord::DeleteExpense { group, expense: id }),
        _ => Err(SettleError::invalid_record(format!(
            "Invalid record type: '{}' for id {}",
            csv_record.record_type, id
        ))),
    }
}

fn parse_expense(id: String, csv_record: CsvRecord) -> Result<Expense, SettleError> {
    let amount_str = required(csv_record.amount, "amount", "expense")?;
    let amount = parse_amount(&amount_str, &id)?;
    let paid_by = required(csv_record.paid_by, "paid_by", "expense")?;

    let split_with: Vec<String> = present(csv_record.split_with)
        .map(|list| split_list(&list).map(str::to_string).collect())
        .unwrap_or_default();

    let description = present(csv_record.name).unwrap_or_default();
    let mut expense = Expense::even(id, description, amount, paid_by, split_with);

    if let Some(list) = present(csv_record.split_amounts) {
        let split_amounts = split_list(&list)
            .map(|value| parse_amount(value, &expense.id))
            .collect::<Result<Vec<_>, _>>()?;
        expense = expense.with_split_amounts(split_amounts);
    }

    if let Some(date) = present(csv_record.date) {
        let date = parse_date(&date).ok_or_else(|| {
            SettleError::invalid_record(format!(
                "Invalid date '{}' for expense {}",
                date, expense.id
            ))
        })?;
        expense = expense.with_date(date);
    }

    Ok(expense)
}

/// Trimmed column value, `None` when missing or blank
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, column: &str, record_type: &str) -> Result<String, SettleError> {
    present(value).ok_or_else(|| {
        SettleError::invalid_record(format!("{} record requires '{}'", record_type, column))
    })
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn parse_amount(value: &str, expense: &str) -> Result<Decimal, SettleError> {
    Decimal::from_str(value.trim()).map_err(|_| {
        SettleError::invalid_record(format!("Invalid amount '{}' for expense {}", value, expense))
    })
}

/// Parse an RFC 3339 timestamp, or a plain `YYYY-MM-DD` date at midnight UTC
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

/// Format an amount with exactly `scale` decimal places
///
/// Half-way values round away from zero. Zero is never printed with a sign.
pub fn format_amount(amount: Decimal, scale: u32) -> String {
    let rounded = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.*}", scale as usize, rounded)
}

/// Write the settlement plan of every group
///
/// Columns: group, from, to, amount. Reports are written in the order given;
/// payments keep resolver order.
pub fn write_settlements_csv(
    reports: &[GroupReport],
    scale: u32,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["group", "from", "to", "amount"])?;

    for report in reports {
        for settlement in &report.settlements {
            writer.write_record([
                report.group().as_str(),
                settlement.from.as_str(),
                settlement.to.as_str(),
                format_amount(settlement.amount, scale).as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-member balance summary of every group
///
/// Columns: group, member, name, balance, owes, owed. Members keep the
/// order in which they joined their group.
pub fn write_balances_csv(
    reports: &[GroupReport],
    scale: u32,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["group", "member", "name", "balance", "owes", "owed"])?;

    for report in reports {
        for entry in &report.summary.members {
            writer.write_record([
                report.group().as_str(),
                entry.member.as_str(),
                entry.name.as_str(),
                format_amount(entry.balance, scale).as_str(),
                format_amount(entry.owes(), scale).as_str(),
                format_amount(entry.owed(), scale).as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write the requested report
pub fn write_report(
    reports: &[GroupReport],
    kind: ReportKind,
    scale: u32,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    match kind {
        ReportKind::Settlements => write_settlements_csv(reports, scale, output),
        ReportKind::Balances => write_balances_csv(reports, scale, output),
    }
}
