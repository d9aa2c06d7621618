mod ranker;
mod scorer;
mod tokenizer;

pub use ranker::{rank, Ranked};
pub use scorer::{score_asset, ScoreWeights};
pub use tokenizer::tokenize;
