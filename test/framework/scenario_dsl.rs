//! # Scenario DSL
//!
//! Named Given/When/Then scenarios over a freshly deployed engine. Steps run
//! in declaration order within their phase; attached invariants are checked
//! once all actions have run and before any assertion does.
//!
//! ```rust,ignore
//! Scenario::new("Time-lock releases after unlock")
//!     .given(|ctx| {
//!         let owner = ctx.harness.create_owner(10_000);
//!         ctx.users.push(owner);
//!     })
//!     .when("the owner locks and waits", |ctx| {
//!         let id = ctx.harness.create_lock(&ctx.users[0], 10_000, 86_400);
//!         ctx.ids.push(id);
//!         ctx.harness.env.advance_time(86_400);
//!     })
//!     .then("the owner withdraws everything", |ctx| {
//!         assert_eq!(ctx.harness.withdraw(&ctx.users[0], ctx.ids[0]), 10_000);
//!     })
//!     .run();
//! ```

extern crate std;

use soroban_sdk::Address;
use std::collections::HashMap;
use std::string::String;
use std::vec::Vec;

use super::invariants::InvariantSet;
use super::{DistributionTestHarness, TestEnv};

/// State shared by the steps of one scenario.
pub struct ScenarioContext<'a, 'b> {
    pub harness: &'a DistributionTestHarness<'b>,
    /// Every address here is included in invariant snapshots.
    pub users: Vec<Address>,
    pub ids: Vec<u64>,
    /// Named balances or amounts carried from one step to a later one.
    pub data: HashMap<String, i128>,
}

impl<'a, 'b> ScenarioContext<'a, 'b> {
    fn new(harness: &'a DistributionTestHarness<'b>) -> Self {
        Self {
            harness,
            users: Vec::new(),
            ids: Vec::new(),
            data: HashMap::new(),
        }
    }

    pub fn store(&mut self, key: &str, value: i128) {
        self.data.insert(key.into(), value);
    }

    pub fn load(&self, key: &str) -> i128 {
        match self.data.get(key) {
            Some(v) => *v,
            None => panic!("nothing stored under '{}'", key),
        }
    }
}

type StepFn = Box<dyn FnOnce(&mut ScenarioContext<'_, '_>)>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
enum Phase {
    Given,
    When,
    Then,
}

struct Step {
    phase: Phase,
    label: String,
    body: StepFn,
}

pub struct Scenario {
    name: String,
    price: u64,
    steps: Vec<Step>,
    invariants: Option<InvariantSet>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            price: 100,
            steps: Vec::new(),
            invariants: None,
        }
    }

    /// Flat creation price the engine is initialised with (default 100).
    pub fn with_price(mut self, price: u64) -> Self {
        self.price = price;
        self
    }

    fn step<F>(mut self, phase: Phase, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.steps.push(Step {
            phase,
            label: label.into(),
            body: Box::new(body),
        });
        self
    }

    pub fn given<F>(self, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Given, "setup", body)
    }

    pub fn when<F>(self, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::When, label, body)
    }

    pub fn then<F>(self, label: &str, body: F) -> Self
    where
        F: FnOnce(&mut ScenarioContext<'_, '_>) + 'static,
    {
        self.step(Phase::Then, label, body)
    }

    pub fn with_invariants(mut self, invariants: InvariantSet) -> Self {
        self.invariants = Some(invariants);
        self
    }

    /// Deploy a fresh engine and run every step. Panics on the first failed
    /// assertion or invariant violation.
    pub fn run(self) {
        let Scenario {
            name,
            price,
            mut steps,
            invariants,
        } = self;

        let mut env = TestEnv::new();
        let harness = DistributionTestHarness::new(&mut env, price);
        let mut ctx = ScenarioContext::new(&harness);

        // Stable: declaration order is kept within a phase.
        steps.sort_by_key(|s| s.phase);

        let mut checked = false;
        for step in steps {
            if step.phase == Phase::Then && !checked {
                if let Some(set) = &invariants {
                    check_invariants(&name, set, &ctx);
                }
                checked = true;
            }
            std::eprintln!("    [{:?}] {}", step.phase, step.label);
            (step.body)(&mut ctx);
        }
        if !checked {
            if let Some(set) = &invariants {
                check_invariants(&name, set, &ctx);
            }
        }
    }
}

fn check_invariants(name: &str, set: &InvariantSet, ctx: &ScenarioContext<'_, '_>) {
    let snapshot = ctx.harness.snapshot(&ctx.users);
    let violations = set.check_all(&snapshot);
    if violations.is_empty() {
        return;
    }
    let mut report = std::format!("'{}' broke {} invariant(s):\n", name, violations.len());
    for (inv, msg) in &violations {
        report.push_str(&std::format!("  {}: {}\n", inv, msg));
    }
    panic!("{}", report);
}

/// Unwrap a `try_*` client result and compare the contract error code.
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(Ok(e)) => assert_eq!(e, $expected),
            Err(Err(e)) => panic!("host error instead of {:?}: {:?}", $expected, e),
            Ok(_) => panic!("call succeeded, expected {:?}", $expected),
        }
    };
}

/// Run each scenario in isolation and return `(passed, failed)`.
pub fn run_scenarios(scenarios: Vec<Scenario>) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;
    for scenario in scenarios {
        let name = scenario.name.clone();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || scenario.run()));
        if outcome.is_ok() {
            passed += 1;
        } else {
            std::eprintln!("  FAILED: {}", name);
            failed += 1;
        }
    }
    (passed, failed)
}
