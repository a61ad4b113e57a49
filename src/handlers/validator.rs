//! Request Validator
//!
//! Pure, synchronous checks over an incoming transfer. Runs before any
//! lookup or write so bad requests never cost I/O.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::domain::{AuthenticatedIdentity, TransferError};

use super::TransferCommand;

/// Where the sender/receiver equality check happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelfTransferRule {
    /// Compare the raw receiver field with the sender id, before lookup.
    /// Only a receiver submitted as the sender's numeric id can trip it.
    #[default]
    RawInput,
    /// Compare the resolved receiver id with the sender, after lookup.
    ResolvedId,
}

impl FromStr for SelfTransferRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::RawInput),
            "resolved" => Ok(Self::ResolvedId),
            other => Err(format!("unknown self-transfer rule: {}", other)),
        }
    }
}

/// Parse a leading integer the lenient way: skip leading whitespace, take
/// an optional sign and a run of digits, ignore whatever follows.
///
/// Returns `None` when there are no digits or the value overflows `i64`.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i128 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Sequential validation chain; the first failing check wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferValidator {
    rule: SelfTransferRule,
}

impl TransferValidator {
    pub fn new(rule: SelfTransferRule) -> Self {
        Self { rule }
    }

    /// Check that the caller may act as the user named in the path.
    ///
    /// Shared by every `/user/:id` route.
    pub fn authorize(
        &self,
        path_user_id: &str,
        identity: &AuthenticatedIdentity,
    ) -> Result<i64, TransferError> {
        let user_id = parse_leading_int(path_user_id).ok_or(TransferError::InvalidIdentifier)?;

        if identity.id != user_id {
            return Err(TransferError::IdentityMismatch);
        }

        Ok(user_id)
    }

    /// Run the full chain and produce a candidate with an unresolved receiver.
    pub fn validate(
        &self,
        path_user_id: &str,
        identity: &AuthenticatedIdentity,
        raw_body: &[u8],
    ) -> Result<TransferCommand, TransferError> {
        let sender = self.authorize(path_user_id, identity)?;
        let body = parse_body(raw_body)?;

        let receiver = present(&body, "receiver")?;
        let amount = present(&body, "amount")?;

        let amount = coerce_amount(amount).ok_or(TransferError::InvalidAmount)?;
        let receiver = receiver_username(receiver).ok_or(TransferError::InvalidReceiver)?;

        if self.rule == SelfTransferRule::RawInput && raw_receiver_is_sender(&receiver, sender) {
            return Err(TransferError::SelfTransfer);
        }

        Ok(TransferCommand::new(sender, receiver, amount))
    }
}

fn parse_body(raw_body: &[u8]) -> Result<Map<String, Value>, TransferError> {
    if raw_body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(raw_body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(TransferError::MalformedBody),
    }
}

fn present<'a>(
    body: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, TransferError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(TransferError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn coerce_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is out of range
            (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Largest float that still holds every integer exactly (2^53)
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn receiver_username(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        // 9.0 names the same user as 9
        Value::Number(n) => {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT).then(|| (f as i64).to_string())
        }
        _ => None,
    }
}

fn raw_receiver_is_sender(receiver: &str, sender: i64) -> bool {
    receiver.trim().parse::<i64>().map_or(false, |id| id == sender)
}
