//! Structural validation for plans.
//!
//! Plans are validated when they are built, before any step runs. Rules
//! use Stillwater's `Validation` type so that every problem is reported in
//! one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use stepwise::validation::{PlanOutline, PlanRules};
//!
//! let rules = PlanRules::new().require_pred(
//!     |outline| outline.contains("init"),
//!     "plan must initialize the control plane".to_string(),
//! );
//!
//! let outline = PlanOutline::new("kubeadm-init", ["check-binaries", "init"]);
//! assert!(rules.validate(&outline).is_success());
//! ```

pub mod outline;
pub mod rules;
pub mod violations;

pub use outline::PlanOutline;
pub use rules::{validate_plan, PlanRule, PlanRules, PlanValidation};
pub use violations::PlanViolation;
