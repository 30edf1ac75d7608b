//! Small planning domains over [`WorldState`].
//!
//! Each builder returns the domain along with the handles tests need.

use planforge_core::{ActionId, Domain, GoalId, Variable};

use crate::world::{bool_variable, WorldState};

/// A woodcutter that needs an axe to chop wood.
pub struct Wood {
    pub domain: Domain<WorldState>,
    pub has_axe: Variable<bool>,
    pub has_wood: Variable<bool>,
    pub axe: GoalId,
    pub wood: GoalId,
    pub chop_wood: ActionId,
}

/// Builds the woodcutter domain. No action achieves `has_axe == true`.
pub fn wood() -> Wood {
    let mut domain = Domain::new();
    let has_axe = bool_variable(&mut domain, "has_axe");
    let has_wood = bool_variable(&mut domain, "has_wood");
    let axe = domain.goal(has_axe, true);
    let wood = domain.goal(has_wood, true);
    let chop_wood = domain
        .add_action("ChopWood", ())
        .needs([axe])
        .achieves([wood])
        .id();

    Wood {
        domain,
        has_axe,
        has_wood,
        axe,
        wood,
        chop_wood,
    }
}

/// Two unconditional achievers of the same goal with different costs.
pub struct CostTie {
    pub domain: Domain<WorldState>,
    pub goal: GoalId,
    pub cheap: ActionId,
    pub expensive: ActionId,
}

pub fn cost_tie() -> CostTie {
    let mut domain = Domain::new();
    let x = bool_variable(&mut domain, "x");
    let goal = domain.goal(x, true);
    let expensive = domain.add_action("Expensive", ()).cost(5.0).achieves([goal]).id();
    let cheap = domain.add_action("Cheap", ()).cost(1.0).achieves([goal]).id();

    CostTie {
        domain,
        goal,
        cheap,
        expensive,
    }
}

/// A three-step chain: A gives `s1`, B turns `s1` into `s2`, C turns `s2`
/// into `s3`.
pub struct Chain {
    pub domain: Domain<WorldState>,
    pub s1: GoalId,
    pub s2: GoalId,
    pub s3: GoalId,
    pub a: ActionId,
    pub b: ActionId,
    pub c: ActionId,
}

pub fn chain() -> Chain {
    let mut domain = Domain::new();
    let v1 = bool_variable(&mut domain, "s1");
    let v2 = bool_variable(&mut domain, "s2");
    let v3 = bool_variable(&mut domain, "s3");
    let s1 = domain.goal(v1, true);
    let s2 = domain.goal(v2, true);
    let s3 = domain.goal(v3, true);
    let a = domain.add_action("A", ()).achieves([s1]).id();
    let b = domain.add_action("B", ()).needs([s1]).achieves([s2]).id();
    let c = domain.add_action("C", ()).needs([s2]).achieves([s3]).id();

    Chain {
        domain,
        s1,
        s2,
        s3,
        a,
        b,
        c,
    }
}
