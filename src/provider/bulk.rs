//! Batched `UPDATE ... CASE` statements for writing scores back.

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::ScoreUpdates;
use crate::scoring::CalculatorKind;

/// Players per statement. Each player binds exactly one parameter.
pub const BATCH_SIZE: usize = 100;

/// One SQL statement with its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Flag and score columns written for each calculator.
fn columns(kind: CalculatorKind) -> (Option<&'static str>, &'static str) {
    match kind {
        CalculatorKind::Bust => (Some("is_bust"), "bust_score"),
        CalculatorKind::Steal => (Some("is_steal"), "steal_score"),
        CalculatorKind::Grade => (None, "grade"),
    }
}

/// Build one statement per batch, in insertion order.
///
/// Ids and flags are inlined; scores are bound. Every id in a batch's
/// `IN (...)` list has a branch in every `CASE`, and there is no `ELSE`.
pub fn build_bulk_updates(kind: CalculatorKind, updates: &ScoreUpdates) -> Vec<Statement> {
    let (flag_column, score_column) = columns(kind);

    updates
        .entries()
        .chunks(BATCH_SIZE)
        .map(|batch| {
            let mut assignments = Vec::with_capacity(2);

            if let Some(flag_column) = flag_column {
                let branches: String = batch
                    .iter()
                    .map(|(id, update)| {
                        let flag = match update.verdict {
                            Some(verdict) => u8::from(verdict),
                            None => {
                                debug!("Player {} has no {} verdict; writing 0", id, flag_column);
                                0
                            }
                        };
                        format!(" WHEN id = {} THEN {}", id, flag)
                    })
                    .collect();
                assignments.push(format!("{} = CASE{} END", flag_column, branches));
            }

            let branches: String = batch
                .iter()
                .map(|(id, _)| format!(" WHEN id = {} THEN ?", id))
                .collect();
            assignments.push(format!("{} = CASE{} END", score_column, branches));

            let ids: Vec<String> = batch.iter().map(|(id, _)| id.to_string()).collect();
            let sql = format!(
                "UPDATE players SET {} WHERE id IN ({})",
                assignments.join(", "),
                ids.join(",")
            );
            let params = batch.iter().map(|(_, update)| Value::from(update.score)).collect();

            Statement::new(sql, params)
        })
        .collect()
}
