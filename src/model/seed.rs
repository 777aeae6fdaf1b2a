use super::item::{Accent, ColumnRange, Phase, TaskType, TimelineItem};
use super::timeline::Timeline;
use crate::error::Result;

fn task(name: &str, kind: TaskType, start: u8, end: u8) -> Result<TimelineItem> {
    Ok(TimelineItem::new(name, ColumnRange::new(start, end)?).with_kind(kind))
}

fn noted(name: &str, kind: TaskType, start: u8, end: u8, note: &str) -> Result<TimelineItem> {
    Ok(task(name, kind, start, end)?.with_note(note))
}

/// Built-in roadmap shown when no data file is configured.
pub fn sample_timeline() -> Result<Timeline> {
    use TaskType::*;

    // ── KUMO ───────────────────────────────────────────────────────
    let kumo = Phase::new(
        "KUMO",
        Accent::Blue,
        vec![
            task("UDP NonProd Infra", Infra, 0, 3)?,
            task("UDP Prod Infra", Infra, 2, 5)?,
            noted("Dev - UDP Framework", Development, 4, 10, "PST, CICD, CRT, OBD")?,
            task("Dev - DAP Outbound (DAP, DGW, ESP)", Development, 4, 11)?,
            noted("Dev - UDP Pipeline", Development, 6, 9, "PST → CRT, OBD")?,
            noted("SIT", Testing, 8, 11, "PST → CRT, OBD")?,
            task("Data Migration - KUMO NonProd", Migration, 8, 11)?,
            noted("Deploy - UDP Framework & Pipeline", Deployment, 11, 13, "PST → CRT, OBD")?,
            noted("Data Migration - KUMO Prod", Migration, 10, 12, "PST → CRT")?,
            task("PVT", Testing, 12, 14)?,
            noted("User Onboard & Migration", Onboarding, 13, 17, "CRM Migrate + Mule")?,
        ],
    );

    // ── Apollo ─────────────────────────────────────────────────────
    let apollo = Phase::new(
        "Apollo (One Retail)",
        Accent::Emerald,
        vec![
            noted(
                "Dev - Apollo Code Conversion",
                Development,
                3,
                9,
                "Req → Run + Feedback → Migrate → UIS",
            )?,
            task("Dev - Apollo Migration Productionize", Development, 8, 13)?,
            noted("Dev - UDP Enhance Framework (Apollo)", Development, 8, 11, "CSV to YAML")?,
            task("Data Migration - Apollo NonProd", Migration, 10, 13)?,
            noted("Dev - UDP Pipeline (Apollo)", Development, 10, 13, "No Feature Apollo")?,
            task("SIT", Testing, 12, 15)?,
            task("Deploy - UDP Enhance Framework", Deployment, 14, 16)?,
            task("Deploy - UDP Pipeline (Apollo)", Deployment, 15, 17)?,
            noted("Data Migration - Apollo Prod", Migration, 16, 18, "Unhash")?,
            task("PVT", Testing, 17, 19)?,
            task("User Apollo Onboard", Onboarding, 18, 20)?,
        ],
    );

    // ── AIVS ───────────────────────────────────────────────────────
    let aivs = Phase::new(
        "AIVS",
        Accent::Amber,
        vec![
            noted("Dev - UDP Enhance Framework ML", Development, 12, 15, "Oat")?,
            task("Data Migration - AIVS NonProd", Migration, 14, 16)?,
            noted("Dev - UDP DE Pipeline (AIVS)", Development, 14, 17, "Oat")?,
            task("Dev - UDP MLE Pipeline (AIVS)", Development, 16, 19)?,
            task("SIT - AIVS", Testing, 17, 19)?,
            noted("UAT - AIVS", Testing, 18, 20, "Need confirm timeline")?,
            task("Deploy - UDP Framework ML", Deployment, 20, 22)?,
            task("Deploy - UDP Pipeline ML", Deployment, 21, 23)?,
            task("Data Migration - AIVS Prod", Migration, 20, 22)?,
            task("PVT - AIVS", Testing, 22, 23)?,
            noted("User AIVS Onboard", Onboarding, 13, 23, "Tentative migrate 3.1, 3.2")?,
        ],
    );

    let special_items = vec![
        TimelineItem::new("Switch OBD: Apollo → UDP", ColumnRange::new(18, 20)?),
        TimelineItem::new("TBD: Oracle Framework (Jul 2027)", ColumnRange::new(20, 23)?),
    ];

    Timeline::new(vec![kumo, apollo, aivs], special_items)
}
