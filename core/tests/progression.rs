mod common;

use common::MemoryHost;
use wayfinder_core::{
    build_tour_steps, guide_by_id, Capabilities, Foreground, GuideDescriptor, GuideStep,
    Progression, Role, TourUser,
};

const COOLDOWN: f64 = 600.0;
const PAST_COOLDOWN: f64 = 1000.0;

static TWO_STOP_GUIDE: GuideDescriptor = GuideDescriptor {
    id: "two-stop",
    title: "Two stops",
    steps: &[
        GuideStep::new("First stop").navigate_to("/admin/rota"),
        GuideStep::new("Second stop")
            .navigate_to("/admin/staff")
            .target("staff-bulk-btn"),
    ],
};

fn admin() -> TourUser {
    TourUser::new("admin-1", Role::Admin)
}

fn scheduling() -> Capabilities {
    Capabilities { scheduling: true }
}

fn running_tour(host: &mut MemoryHost) -> Progression {
    let mut progression = Progression::new(COOLDOWN);
    assert!(progression.start_tour(Some(&admin()), scheduling(), false, host));
    progression
}

#[test]
fn start_tour_navigates_home_at_first_step() {
    let mut host = MemoryHost::new();
    let progression = running_tour(&mut host);
    assert_eq!(progression.foreground(), Foreground::Tour);
    assert_eq!(progression.state().tour_index, 0);
    assert_eq!(host.last_navigation(), Some("/admin"));
    assert_eq!(
        progression.tour_steps(),
        build_tour_steps(Role::Admin, scheduling()).as_slice()
    );
}

#[test]
fn start_tour_without_user_is_silent() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    assert!(!progression.start_tour(None, scheduling(), true, &mut host));
    assert_eq!(progression.foreground(), Foreground::None);
    assert!(host.navigations.is_empty());
}

#[test]
fn completed_users_only_replay_when_forced() {
    let mut host = MemoryHost::new();
    host.completed.insert("admin-1".to_string());
    let mut progression = Progression::new(COOLDOWN);
    assert!(!progression.start_tour(Some(&admin()), scheduling(), false, &mut host));
    assert_eq!(progression.foreground(), Foreground::None);
    assert!(progression.start_tour(Some(&admin()), scheduling(), true, &mut host));
    assert_eq!(progression.foreground(), Foreground::Tour);
}

#[test]
fn unreadable_completion_flag_still_shows_tour() {
    let mut host = MemoryHost::new();
    host.fail_reads = true;
    let mut progression = Progression::new(COOLDOWN);
    assert!(progression.start_tour(Some(&admin()), scheduling(), false, &mut host));
}

#[test]
fn finishing_from_any_index_persists_once() {
    let total = build_tour_steps(Role::Admin, scheduling()).len();
    for start in 0..total {
        let mut host = MemoryHost::new();
        let mut progression = running_tour(&mut host);
        for _ in 0..start {
            host.tick(PAST_COOLDOWN);
            assert!(progression.next_step(&mut host));
        }
        assert_eq!(progression.state().tour_index, start);
        for _ in 0..(total - start) {
            host.tick(PAST_COOLDOWN);
            assert!(progression.next_step(&mut host));
        }
        assert_eq!(progression.foreground(), Foreground::None);
        assert!(!progression.state().tour_active);
        assert_eq!(host.mark_calls, 1, "start index {start}");
        assert!(host.completed.contains("admin-1"));
    }
}

#[test]
fn prev_step_stops_at_zero() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    assert!(!progression.prev_step());
    assert_eq!(progression.state().tour_index, 0);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    assert!(progression.prev_step());
    assert!(!progression.prev_step());
    assert_eq!(progression.state().tour_index, 0);
}

#[test]
fn double_next_within_cooldown_advances_once() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    assert!(progression.next_step(&mut host));
    host.tick(50.0);
    assert!(!progression.next_step(&mut host));
    assert_eq!(progression.state().tour_index, 1);
    host.tick(COOLDOWN);
    assert!(progression.next_step(&mut host));
    assert_eq!(progression.state().tour_index, 2);
}

#[test]
fn end_tour_persists_completion() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    assert!(progression.end_tour(&mut host));
    assert_eq!(progression.foreground(), Foreground::None);
    assert_eq!(host.mark_calls, 1);
    assert!(!progression.end_tour(&mut host));
    assert_eq!(host.mark_calls, 1);
}

#[test]
fn failed_completion_write_still_ends_tour() {
    let mut host = MemoryHost::new();
    host.fail_writes = true;
    let mut progression = running_tour(&mut host);
    assert!(progression.end_tour(&mut host));
    assert_eq!(progression.foreground(), Foreground::None);
}

#[test]
fn guide_preempts_tour_without_completing_it() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);

    let guide = guide_by_id("publish-rota").expect("guide");
    assert!(progression.start_guide(guide, &mut host));

    let state = progression.state();
    assert_eq!(progression.foreground(), Foreground::Guide);
    assert!(!state.tour_active);
    assert_eq!(state.tour_index, 2);
    assert_eq!(state.guide, Some(("publish-rota", 0)));
    assert_eq!(host.mark_calls, 0);
    assert!(!progression.next_step(&mut host));
}

#[test]
fn starting_tour_cancels_guide() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    progression.start_guide(&TWO_STOP_GUIDE, &mut host);
    assert!(progression.start_tour(Some(&admin()), scheduling(), true, &mut host));
    assert_eq!(progression.foreground(), Foreground::Tour);
    assert_eq!(progression.state().guide, None);
}

#[test]
fn guide_pushes_navigation_per_step() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    assert!(progression.start_guide(&TWO_STOP_GUIDE, &mut host));
    assert_eq!(host.navigations, vec!["/admin/rota".to_string()]);

    host.tick(PAST_COOLDOWN);
    assert!(progression.next_guide_step(&mut host));
    assert_eq!(host.last_navigation(), Some("/admin/staff"));
    assert_eq!(progression.state().guide, Some(("two-stop", 1)));

    host.tick(PAST_COOLDOWN);
    assert!(progression.next_guide_step(&mut host));
    assert_eq!(progression.foreground(), Foreground::None);
    assert_eq!(host.navigations.len(), 2);
    assert_eq!(host.mark_calls, 0);
}

#[test]
fn guide_advance_respects_cooldown() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    progression.start_guide(&TWO_STOP_GUIDE, &mut host);
    assert!(progression.next_guide_step(&mut host));
    assert!(!progression.next_guide_step(&mut host));
    assert_eq!(progression.foreground(), Foreground::Guide);
}

#[test]
fn stop_guide_goes_idle() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    progression.start_guide(&TWO_STOP_GUIDE, &mut host);
    assert!(progression.stop_guide());
    assert_eq!(progression.foreground(), Foreground::None);
    assert!(!progression.stop_guide());
}

#[test]
fn arriving_on_required_route_advances_tour() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    let current = progression.active_step().expect("step");
    assert_eq!(current.target_id, Some("nav-staff"));

    host.tick(PAST_COOLDOWN);
    assert!(!progression.on_route_change("/admin/reports", &mut host));
    assert!(progression.on_route_change("/admin/staff", &mut host));
    assert_eq!(
        progression.active_step().and_then(|step| step.target_id),
        Some("staff-add-btn")
    );
}

#[test]
fn route_watcher_ignores_steps_without_required_route() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    host.tick(PAST_COOLDOWN);
    assert!(!progression.on_route_change("/admin", &mut host));
    assert_eq!(progression.state().tour_index, 0);
}

#[test]
fn click_and_route_watcher_advance_once_for_one_step() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    let armed = progression.step_key();

    // The click navigates, the route watcher fires first, then the click delay elapses.
    host.tick(PAST_COOLDOWN);
    assert!(progression.on_route_change("/admin/staff", &mut host));
    host.tick(PAST_COOLDOWN);
    assert!(!progression.advance_from(armed, &mut host));
    assert_eq!(progression.state().tour_index, 3);
}

#[test]
fn route_arrival_inside_cooldown_advances_once_when_lock_expires() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    let armed = progression.step_key();

    // The click navigates 400ms after the last advance.
    host.tick(400.0);
    assert!(!progression.on_route_change("/admin/staff", &mut host));
    assert!(progression.route_satisfies_next("/admin/staff"));
    assert_eq!(progression.cooldown_remaining_ms(host.now), 200.0);
    assert_eq!(progression.state().tour_index, 2);

    // Post-click delay elapses after the lock.
    host.tick(300.0);
    assert_eq!(progression.cooldown_remaining_ms(host.now), 0.0);
    assert!(progression.advance_from(armed, &mut host));
    host.tick(PAST_COOLDOWN);
    assert!(!progression.advance_from(armed, &mut host));
    assert!(!progression.on_route_change("/admin/reports", &mut host));
    assert_eq!(progression.state().tour_index, 3);
}

#[test]
fn route_gate_check_needs_a_running_tour() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    assert!(!progression.route_satisfies_next("/admin/staff"));
    progression.start_guide(&TWO_STOP_GUIDE, &mut host);
    assert!(!progression.route_satisfies_next("/admin/staff"));
    assert_eq!(progression.cooldown_remaining_ms(host.now), 0.0);
}

#[test]
fn step_keys_change_on_every_transition() {
    let mut host = MemoryHost::new();
    let mut progression = running_tour(&mut host);
    let first = progression.step_key();
    host.tick(PAST_COOLDOWN);
    progression.next_step(&mut host);
    let second = progression.step_key();
    progression.prev_step();
    let third = progression.step_key();
    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_ne!(first, third);
}

#[test]
fn advance_from_current_key_moves_guide() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    progression.start_guide(&TWO_STOP_GUIDE, &mut host);
    let key = progression.step_key();
    assert!(progression.advance_from(key, &mut host));
    assert_eq!(progression.state().guide, Some(("two-stop", 1)));
}

#[test]
fn active_step_reports_guide_title_and_position() {
    let mut host = MemoryHost::new();
    let mut progression = Progression::new(COOLDOWN);
    let guide = guide_by_id("publish-rota").expect("guide");
    progression.start_guide(guide, &mut host);
    host.tick(PAST_COOLDOWN);
    progression.next_guide_step(&mut host);
    let step = progression.active_step().expect("step");
    assert_eq!(step.title, "Publish a rota");
    assert_eq!(step.index, 1);
    assert_eq!(step.total, 2);
    assert!(step.is_last());
    assert_eq!(step.required_route, None);
}
