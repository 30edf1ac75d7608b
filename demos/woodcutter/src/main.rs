//! Woodcutter Example
//!
//! A woodcutter at home wants a fire. To light one they need wood, to chop
//! wood they need an axe and to be in the forest, and axes are sold at the
//! shop. The planner works out the errands; this program then runs them.
//!
//! Planner settings are read from `planner.toml` when present.

use planforge::console;
use planforge::prelude::*;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Place {
    Home,
    Shop,
    Forest,
}

impl Place {
    fn name(self) -> &'static str {
        match self {
            Place::Home => "home",
            Place::Shop => "shop",
            Place::Forest => "forest",
        }
    }
}

/// The world as the woodcutter sees it.
#[derive(Debug, Clone, PartialEq)]
struct Woodcutter {
    place: Place,
    has_axe: bool,
    wood: u32,
    fire_lit: bool,
}

impl Woodcutter {
    fn new() -> Self {
        Woodcutter {
            place: Place::Home,
            has_axe: false,
            wood: 0,
            fire_lit: false,
        }
    }
}

type Behavior = fn(&mut Woodcutter);

struct World {
    domain: Domain<Woodcutter, Behavior>,
    warm: GoalId,
}

fn build_domain() -> World {
    let mut domain: Domain<Woodcutter, Behavior> = Domain::new();

    let place = domain.add_variable("place", |w: &Woodcutter| w.place.name());
    let has_axe = domain.add_variable("has_axe", |w: &Woodcutter| w.has_axe);
    let has_wood = domain.add_variable("has_wood", |w: &Woodcutter| w.wood > 0);
    let fire_lit = domain.add_variable("fire_lit", |w: &Woodcutter| w.fire_lit);

    let at_shop = domain.goal(place, "shop");
    let at_forest = domain.goal(place, "forest");
    let axe = domain.goal(has_axe, true);
    let wood = domain.goal(has_wood, true);
    let warm = domain.goal(fire_lit, true);

    domain
        .add_action("WalkToShop", |w| w.place = Place::Shop)
        .cost(2.0)
        .achieves([at_shop]);
    domain
        .add_action("WalkToForest", |w| w.place = Place::Forest)
        .cost(3.0)
        .achieves([at_forest]);
    domain
        .add_action("BuyAxe", |w| w.has_axe = true)
        .needs([at_shop])
        .achieves([axe]);
    domain
        .add_action("ChopWood", |w| w.wood += 3)
        .needs([axe, at_forest])
        .achieves([wood]);
    domain
        .add_action("LightFire", |w| {
            w.wood -= 1;
            w.fire_lit = true;
        })
        .needs([wood])
        .achieves([warm]);

    World { domain, warm }
}

fn main() {
    console::init();

    let config = PlannerConfig::load("planner.toml").unwrap_or_default();
    let World { domain, warm } = build_domain();

    if let Err(e) = domain.validate() {
        eprintln!("invalid domain: {e}");
        std::process::exit(1);
    }

    let executive = Executive::new(&domain, [warm]).with_planner(Planner::from_config(&config));
    let mut woodcutter = Woodcutter::new();

    while let Some((goal, plan)) = executive.next_plan(&woodcutter) {
        println!(
            "\nPlan for {}: {}",
            domain.get_goal(goal),
            plan.display(&domain)
        );
        for action in plan.steps(&domain) {
            (action.behavior())(&mut woodcutter);
            info!(event = "step", action = action.name(), place = woodcutter.place.name());
            println!("  {:<12} -> {:?}", action.name(), woodcutter);
        }
    }

    println!("\nNothing left to do: {:?}", woodcutter);
}
