pub mod evaluation;
pub mod knobs;
pub mod output;
pub mod search;

pub use evaluation::{evaluate_knobs, evaluate_profile, EvaluationResult, ProfileResult};
pub use knobs::{KnobRanges, TunerKnobs};
pub use output::{print_topk, write_best_json, write_csv};
pub use search::{default_profiles, run_tuner, TunerConfig, TunerResults};
