//! Structural check for unix-cron expressions (`minute hour day-of-month month day-of-week`).

struct CronField {
    name: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
}

const MONTHS: &[&str] = &[
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const WEEKDAYS: &[&str] = &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const FIELDS: [CronField; 5] = [
    CronField { name: "minute", min: 0, max: 59, names: &[] },
    CronField { name: "hour", min: 0, max: 23, names: &[] },
    CronField { name: "day-of-month", min: 1, max: 31, names: &[] },
    CronField { name: "month", min: 1, max: 12, names: MONTHS },
    CronField { name: "day-of-week", min: 0, max: 7, names: WEEKDAYS },
];

/// Returns `true` if `expr` is a five-field unix-cron expression.
pub fn is_valid_schedule(expr: &str) -> bool {
    check_schedule(expr).is_ok()
}

/// Check `expr`, returning a human-readable reason on failure.
pub(crate) fn check_schedule(expr: &str) -> Result<(), String> {
    let parts: Vec<&str> = expr.split_whitespace().collect();
    if parts.len() != FIELDS.len() {
        return Err(format!(
            "expected {} fields, found {}",
            FIELDS.len(),
            parts.len()
        ));
    }

    FIELDS
        .iter()
        .zip(parts)
        .try_for_each(|(field, part)| check_field(field, part))
}

fn check_field(field: &CronField, part: &str) -> Result<(), String> {
    part.split(',').try_for_each(|item| {
        check_item(field, item).map_err(|reason| format!("{} field '{part}': {reason}", field.name))
    })
}

fn check_item(field: &CronField, item: &str) -> Result<(), String> {
    let (range, step) = match item.split_once('/') {
        Some((range, step)) => (range, Some(step)),
        None => (item, None),
    };

    if let Some(step) = step {
        match step.parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => return Err(format!("invalid step '{step}'")),
        }
    }

    if range == "*" {
        return Ok(());
    }

    match range.split_once('-') {
        Some((lo, hi)) => {
            let lo = value(field, lo)?;
            let hi = value(field, hi)?;
            if lo > hi {
                return Err(format!("range {lo}-{hi} is reversed"));
            }
            Ok(())
        }
        None => value(field, range).map(|_| ()),
    }
}

fn value(field: &CronField, raw: &str) -> Result<u32, String> {
    let upper = raw.to_ascii_uppercase();
    if let Some(pos) = field.names.iter().position(|n| *n == upper) {
        let offset = u32::try_from(pos).map_err(|e| e.to_string())?;
        return Ok(field.min + offset);
    }

    let n: u32 = raw.parse().map_err(|_| format!("invalid value '{raw}'"))?;
    if n < field.min || n > field.max {
        return Err(format!(
            "value {n} out of range {}-{}",
            field.min, field.max
        ));
    }
    Ok(n)
}
