mod aggregation;
mod concurrency;
mod properties;
mod scenarios;
