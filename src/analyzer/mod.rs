//! Analyzer module - metric analyzers, score aggregation and the engine

pub mod engine;
pub mod metrics;
pub mod scoring;

pub use engine::{
    AnalysisEngine, AnalysisSettings, AxisStats, AxisSummary, BatchReport, RankedArticle,
    ScoreBand,
};
pub use scoring::{ScoreAggregator, ScoringWeights, TopicProfile, WeightStrategy, WEIGHT_EPSILON};
