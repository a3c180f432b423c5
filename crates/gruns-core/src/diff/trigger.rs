use crate::{diff::FieldRule, map::DesiredTrigger, resource::TriggerJob};

type Rule = FieldRule<TriggerJob, DesiredTrigger>;

/// Fields of a trigger kept in sync with the job file, in mask order.
///
/// State is not part of the table; pause and resume go through their own calls.
pub static TRIGGER_FIELDS: &[Rule] = &[
    FieldRule {
        path: "schedule",
        differs: schedule_differs,
        apply: apply_schedule,
    },
    FieldRule {
        path: "time_zone",
        differs: time_zone_differs,
        apply: apply_time_zone,
    },
    FieldRule {
        path: "http_target.uri",
        differs: uri_differs,
        apply: apply_target,
    },
];

fn schedule_differs(r: &TriggerJob, d: &DesiredTrigger) -> bool {
    r.schedule != d.schedule
}

fn apply_schedule(r: &mut TriggerJob, d: &DesiredTrigger) {
    r.schedule = d.schedule.clone();
}

fn time_zone_differs(r: &TriggerJob, d: &DesiredTrigger) -> bool {
    r.time_zone != d.time_zone
}

fn apply_time_zone(r: &mut TriggerJob, d: &DesiredTrigger) {
    r.time_zone = d.time_zone.clone();
}

fn uri_differs(r: &TriggerJob, d: &DesiredTrigger) -> bool {
    r.http_target.as_ref().map(|t| t.uri.as_str()) != Some(d.uri.as_str())
}

// A moved URI gets a complete new target, auth included.
fn apply_target(r: &mut TriggerJob, d: &DesiredTrigger) {
    r.http_target = Some(d.http_target());
}
