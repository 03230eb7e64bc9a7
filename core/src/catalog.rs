use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdvancePolicy {
    #[default]
    Auto,
    ClickThrough,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TourStep {
    pub target_id: Option<&'static str>,
    pub title: &'static str,
    pub content: &'static str,
    pub position: Side,
    pub advance: AdvancePolicy,
    pub required_route: Option<&'static str>,
    pub transparent_backdrop: bool,
}

impl TourStep {
    pub const fn new(title: &'static str, content: &'static str) -> Self {
        Self {
            target_id: None,
            title,
            content,
            position: Side::Bottom,
            advance: AdvancePolicy::Auto,
            required_route: None,
            transparent_backdrop: false,
        }
    }

    pub const fn target(self, target_id: &'static str) -> Self {
        Self {
            target_id: Some(target_id),
            ..self
        }
    }

    pub const fn placed(self, position: Side) -> Self {
        Self { position, ..self }
    }

    pub const fn centered(self) -> Self {
        Self {
            position: Side::Center,
            ..self
        }
    }

    pub const fn click_through(self) -> Self {
        Self {
            advance: AdvancePolicy::ClickThrough,
            ..self
        }
    }

    pub const fn on_route(self, route: &'static str) -> Self {
        Self {
            required_route: Some(route),
            ..self
        }
    }

    pub const fn transparent(self) -> Self {
        Self {
            transparent_backdrop: true,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideStep {
    pub content: &'static str,
    pub target_id: Option<&'static str>,
    pub route: Option<&'static str>,
    pub position: Option<Side>,
}

impl GuideStep {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            target_id: None,
            route: None,
            position: None,
        }
    }

    pub const fn target(self, target_id: &'static str) -> Self {
        Self {
            target_id: Some(target_id),
            ..self
        }
    }

    pub const fn navigate_to(self, route: &'static str) -> Self {
        Self {
            route: Some(route),
            ..self
        }
    }

    pub const fn placed(self, position: Side) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct GuideDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub steps: &'static [GuideStep],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn home_route(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Staff => "/staff",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("admin") {
            Ok(Role::Admin)
        } else if trimmed.eq_ignore_ascii_case("staff") {
            Ok(Role::Staff)
        } else {
            Err(RoleParseError {
                value: trimmed.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError {
    value: String,
}

impl fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.value)
    }
}

impl std::error::Error for RoleParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourUser {
    pub id: String,
    pub role: Role,
}

impl TourUser {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub scheduling: bool,
}

const ADMIN_INTRO: &[TourStep] = &[
    TourStep::new(
        "Welcome to your workspace",
        "This short tour shows where the **everyday tools** live. Leave at any time with Skip.",
    )
    .centered(),
    TourStep::new(
        "Today at a glance",
        "The **dashboard** sums up who is working, open shifts and pending requests.",
    )
    .target("dashboard-summary"),
    TourStep::new("Your team", "Open **Staff** to manage the people on your team.")
        .target("nav-staff")
        .placed(Side::Right)
        .click_through(),
];

const ADMIN_STAFF: &[TourStep] = &[
    TourStep::new("Add people", "Use **Add staff** to invite someone by email.")
        .target("staff-add-btn")
        .on_route("/admin/staff"),
    TourStep::new(
        "Bring a whole team",
        "Got a spreadsheet? **Bulk add** imports everyone in one go.",
    )
    .target("staff-bulk-btn")
    .placed(Side::Left)
    .on_route("/admin/staff"),
];

const ADMIN_SCHEDULING: &[TourStep] = &[
    TourStep::new("Plan the week", "Open **Rota** to plan shifts week by week.")
        .target("nav-rota")
        .placed(Side::Right)
        .click_through(),
    TourStep::new(
        "The week grid",
        "Drag across a day to create a shift, then assign it to someone.",
    )
    .target("rota-week-grid")
    .placed(Side::Top)
    .on_route("/admin/rota"),
    TourStep::new(
        "Publish",
        "**Publish** sends the week to your team. Staff see nothing until you do.",
    )
    .target("rota-publish-btn")
    .placed(Side::Left)
    .on_route("/admin/rota"),
];

const ADMIN_SCHEDULING_BYPASS: &[TourStep] = &[
    TourStep::new(
        "Scheduling is switched off",
        "Shift planning lives in the **Scheduling** module. Open **Settings** to find it.",
    )
    .target("nav-settings")
    .placed(Side::Right)
    .click_through(),
    TourStep::new(
        "Modules",
        "Switch on **Scheduling** here whenever you are ready to plan shifts.",
    )
    .target("settings-modules")
    .on_route("/admin/settings"),
];

const ADMIN_OUTRO: &[TourStep] = &[
    TourStep::new("Reports", "Open **Reports** for hours and attendance.")
        .target("nav-reports")
        .placed(Side::Right)
        .click_through(),
    TourStep::new(
        "Take it with you",
        "**Export** downloads the current view as a spreadsheet.",
    )
    .target("reports-export")
    .placed(Side::Top)
    .on_route("/admin/reports"),
    TourStep::new(
        "You're all set",
        "Replay this tour any time from the **Help** menu.",
    )
    .centered()
    .transparent(),
];

const STAFF_SCRIPT: &[TourStep] = &[
    TourStep::new(
        "Welcome",
        "A quick look at where your **shifts** and **requests** live.",
    )
    .centered(),
    TourStep::new(
        "Your next shift",
        "Your **next shift** always sits at the top of the home screen.",
    )
    .target("staff-next-shift"),
    TourStep::new(
        "Availability",
        "Open **Availability** to tell your manager when you can work.",
    )
    .target("nav-availability")
    .placed(Side::Right)
    .click_through(),
    TourStep::new(
        "Mark your days",
        "Tap a day to switch between **available** and **unavailable**.",
    )
    .target("availability-calendar")
    .placed(Side::Top)
    .on_route("/staff/availability"),
    TourStep::new("Time off", "Holidays and leave go through **Time off**.")
        .target("nav-time-off")
        .placed(Side::Right)
        .click_through(),
    TourStep::new(
        "Ask for leave",
        "**Request time off** sends the dates straight to your manager.",
    )
    .target("time-off-request-btn")
    .placed(Side::Left)
    .on_route("/staff/time-off"),
    TourStep::new(
        "That's it",
        "Replay this tour any time from the **Help** menu.",
    )
    .centered()
    .transparent(),
];

pub fn build_tour_steps(role: Role, capabilities: Capabilities) -> Vec<TourStep> {
    match role {
        Role::Admin => {
            let scheduling = if capabilities.scheduling {
                ADMIN_SCHEDULING
            } else {
                ADMIN_SCHEDULING_BYPASS
            };
            [ADMIN_INTRO, ADMIN_STAFF, scheduling, ADMIN_OUTRO].concat()
        }
        Role::Staff => STAFF_SCRIPT.to_vec(),
    }
}

pub const GUIDES: &[GuideDescriptor] = &[
    GuideDescriptor {
        id: "publish-rota",
        title: "Publish a rota",
        steps: &[
            GuideStep::new("Everything you plan for the week shows up on this grid.")
                .navigate_to("/admin/rota")
                .target("rota-week-grid"),
            GuideStep::new("When the week looks right, **Publish** it to notify your team.")
                .target("rota-publish-btn")
                .placed(Side::Left),
        ],
    },
    GuideDescriptor {
        id: "bulk-add-staff",
        title: "Import your team",
        steps: &[
            GuideStep::new("Shifts can only be assigned to people already on your team.")
                .navigate_to("/admin/rota"),
            GuideStep::new("**Bulk add** takes a CSV with one person per row.")
                .navigate_to("/admin/staff")
                .target("staff-bulk-btn"),
        ],
    },
    GuideDescriptor {
        id: "request-time-off",
        title: "Request time off",
        steps: &[
            GuideStep::new("Leave requests start from **Request time off**.")
                .navigate_to("/staff/time-off")
                .target("time-off-request-btn"),
            GuideStep::new("Pick the dates and add a note. Your manager is told straight away.")
                .target("time-off-form")
                .placed(Side::Top),
        ],
    },
];

pub fn guide_by_id(id: &str) -> Option<&'static GuideDescriptor> {
    let trimmed = id.trim();
    GUIDES
        .iter()
        .find(|guide| guide.id.eq_ignore_ascii_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_is_deterministic() {
        for role in [Role::Admin, Role::Staff] {
            for scheduling in [false, true] {
                let caps = Capabilities { scheduling };
                assert_eq!(build_tour_steps(role, caps), build_tour_steps(role, caps));
            }
        }
    }

    #[test]
    fn scheduling_flag_swaps_admin_subsequence() {
        let with = build_tour_steps(Role::Admin, Capabilities { scheduling: true });
        let without = build_tour_steps(Role::Admin, Capabilities { scheduling: false });
        assert!(with.iter().any(|step| step.target_id == Some("nav-rota")));
        assert!(!without.iter().any(|step| step.target_id == Some("nav-rota")));
        assert!(without.iter().any(|step| step.target_id == Some("settings-modules")));
        assert_eq!(with.first(), without.first());
        assert_eq!(with.last(), without.last());
    }

    #[test]
    fn staff_script_ignores_capabilities() {
        assert_eq!(
            build_tour_steps(Role::Staff, Capabilities { scheduling: true }),
            build_tour_steps(Role::Staff, Capabilities { scheduling: false })
        );
    }

    #[test]
    fn second_step_is_not_route_gated() {
        // start navigates home, which must not auto-advance past the intro.
        for role in [Role::Admin, Role::Staff] {
            let steps = build_tour_steps(role, Capabilities { scheduling: true });
            assert!(steps[1].required_route.is_none());
        }
    }

    #[test]
    fn click_through_steps_lead_into_a_routed_step() {
        for (role, scheduling) in [(Role::Admin, false), (Role::Admin, true), (Role::Staff, false)] {
            let steps = build_tour_steps(role, Capabilities { scheduling });
            for pair in steps.windows(2) {
                if pair[0].advance == AdvancePolicy::ClickThrough {
                    assert!(pair[1].required_route.is_some(), "{}", pair[0].title);
                }
            }
        }
    }

    #[test]
    fn guides_resolve_by_id() {
        let guide = guide_by_id(" Bulk-Add-Staff ").expect("guide");
        assert_eq!(guide.steps.len(), 2);
        assert_eq!(guide.steps[0].route, Some("/admin/rota"));
        assert!(guide_by_id("missing").is_none());
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" staff ".parse::<Role>(), Ok(Role::Staff));
        assert!("owner".parse::<Role>().is_err());
    }
}
