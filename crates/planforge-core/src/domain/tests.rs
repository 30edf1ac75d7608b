//! Tests for the domain registry.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn counting_domain() -> (Domain<u32>, Variable<i64>, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut domain = Domain::new();
    let health = domain.add_variable("health", move |agent: &u32| {
        counter.set(counter.get() + 1);
        i64::from(*agent) * 10
    });
    (domain, health, calls)
}

#[test]
fn test_goal_interning() {
    let mut domain: Domain<()> = Domain::new();
    let open = domain.add_variable("door_open", |_: &()| false);

    let a = domain.goal(open, true);
    let b = domain.goal(open, true);
    let c = domain.goal(open, false);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(domain.goals().count(), 2);
    assert_eq!(domain.find_goal(open, true), Some(a));
}

#[test]
fn test_find_goal_does_not_create() {
    let mut domain: Domain<()> = Domain::new();
    let open = domain.add_variable("door_open", |_: &()| false);

    assert!(domain.find_goal(open, true).is_none());
    assert_eq!(domain.goals().count(), 0);
}

#[test]
fn test_goals_on_different_variables_are_distinct() {
    let mut domain: Domain<()> = Domain::new();
    let a = domain.add_variable("a", |_: &()| true);
    let b = domain.add_variable("b", |_: &()| true);

    assert_ne!(domain.goal(a, true), domain.goal(b, true));
}

#[test]
fn test_uids_are_shared_across_kinds() {
    let mut domain: Domain<()> = Domain::new();
    let v = domain.add_variable("v", |_: &()| 1i64);
    let g = domain.goal(v, 2);
    let a = domain.add_action("act", ()).achieves([g]).id();

    assert!(v.id().uid() < g.uid());
    assert!(g.uid() < a.uid());
}

#[test]
fn test_goal_label() {
    let mut domain: Domain<()> = Domain::new();
    let place = domain.add_variable("location", |_: &()| "camp");
    let g = domain.goal(place, "forest");

    assert_eq!(domain.get_goal(g).label(), "location == \"forest\"");
    assert_eq!(format!("{}", domain.get_goal(g)), "location == \"forest\"");
}

#[test]
fn test_value_cached_per_context() {
    let (domain, health, calls) = counting_domain();

    assert_eq!(domain.value_for(health.id(), &1), Value::Int(10));
    assert_eq!(domain.value_for(health.id(), &1), Value::Int(10));
    assert_eq!(calls.get(), 1);

    assert_eq!(domain.value_for(health.id(), &2), Value::Int(20));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_invalidate_forces_recompute() {
    let (domain, health, calls) = counting_domain();

    domain.value_for(health.id(), &1);
    assert!(domain.get_variable(health.id()).is_cached());

    domain.invalidate_cached_values();
    assert!(!domain.get_variable(health.id()).is_cached());

    domain.value_for(health.id(), &1);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_stale_value_survives_without_invalidation() {
    let world = Rc::new(Cell::new(false));
    let probe = Rc::clone(&world);
    let mut domain: Domain<()> = Domain::new();
    let lit = domain.add_variable("lit", move |_: &()| probe.get());
    let goal = domain.goal(lit, true);

    assert!(!domain.is_goal_true_for(goal, &()));
    world.set(true);
    assert!(!domain.is_goal_true_for(goal, &()));

    domain.invalidate_cached_values();
    assert!(domain.is_goal_true_for(goal, &()));
}

#[test]
fn test_achieves_registers_achiever_once() {
    let mut domain: Domain<()> = Domain::new();
    let wood = domain.add_variable("has_wood", |_: &()| false);
    let g = domain.goal(wood, true);

    let chop = domain.add_action("ChopWood", ()).achieves([g]).id();
    domain.action_mut(chop).achieves([g, g]);

    assert_eq!(domain.achievers(g), &[chop]);
    assert!(domain.get_action(chop).has_effect(g));
    assert_eq!(domain.get_action(chop).effects().count(), 1);
}

#[test]
fn test_needs_is_last_write_wins() {
    let mut domain: Domain<()> = Domain::new();
    let a = domain.add_variable("a", |_: &()| false);
    let b = domain.add_variable("b", |_: &()| false);
    let ga = domain.goal(a, true);
    let gb = domain.goal(b, true);

    let act = domain.add_action("act", ()).needs([ga]).needs([gb]).id();

    assert_eq!(domain.get_action(act).preconditions(), &[gb]);
}

#[test]
fn test_needs_preserves_order() {
    let mut domain: Domain<()> = Domain::new();
    let vars: Vec<_> = (0..6)
        .map(|i| domain.add_variable(format!("v{i}"), |_: &()| false))
        .collect();
    let goals: Vec<GoalId> = vars.iter().map(|v| domain.goal(*v, true)).collect();

    let act = domain.add_action("act", ()).needs(goals.clone()).id();

    assert_eq!(domain.get_action(act).preconditions(), goals.as_slice());
}

#[test]
fn test_action_defaults_and_behavior() {
    let mut domain: Domain<(), &'static str> = Domain::new();
    let act = domain.add_action("Wave", "wave_anim").id();
    let action = domain.get_action(act);

    assert_eq!(action.name(), "Wave");
    assert_eq!(action.cost(), 1.0);
    assert!(action.preconditions().is_empty());
    assert_eq!(*action.behavior(), "wave_anim");
}

#[test]
fn test_goal_validity() {
    let mut domain: Domain<u32> = Domain::new();
    let v = domain.add_variable("v", |_: &u32| true);
    let g = domain.goal(v, true);

    assert!(domain.is_goal_valid_for(g, &0));
    domain.valid_when(g, |agent| *agent > 5);
    assert!(!domain.is_goal_valid_for(g, &0));
    assert!(domain.is_goal_valid_for(g, &6));
}

#[test]
fn test_variable_by_name() {
    let mut domain: Domain<()> = Domain::new();
    let v = domain.add_variable("has_axe", |_: &()| true);

    assert_eq!(domain.variable_by_name("has_axe"), Ok(v.id()));
    assert_eq!(
        domain.variable_by_name("has_saw"),
        Err(DomainError::UnknownVariable("has_saw".to_string()))
    );
}

#[test]
fn test_validate_accepts_well_formed_domain() {
    let mut domain: Domain<()> = Domain::new();
    let v = domain.add_variable("v", |_: &()| false);
    let g = domain.goal(v, true);
    domain.add_action("act", ()).achieves([g]).cost(3.5);

    assert!(domain.validate().is_ok());
}

#[test]
fn test_validate_rejects_negative_cost() {
    let mut domain: Domain<()> = Domain::new();
    let v = domain.add_variable("v", |_: &()| false);
    let g = domain.goal(v, true);
    domain.add_action("act", ()).achieves([g]).cost(-1.0);

    assert!(matches!(
        domain.validate(),
        Err(DomainError::InvalidCost { ref action, .. }) if action == "act"
    ));
}

#[test]
fn test_validate_rejects_action_without_effects() {
    let mut domain: Domain<()> = Domain::new();
    domain.add_action("idle", ());

    assert_eq!(
        domain.validate(),
        Err(DomainError::NoEffects {
            action: "idle".to_string()
        })
    );
}

#[test]
fn test_validate_rejects_nan_goal_cost() {
    let mut domain: Domain<()> = Domain::new();
    let v = domain.add_variable("v", |_: &()| false);
    let g = domain.goal(v, true);
    domain.set_goal_cost(g, f64::NAN);

    assert!(matches!(
        domain.validate(),
        Err(DomainError::InvalidGoalCost { .. })
    ));
}
