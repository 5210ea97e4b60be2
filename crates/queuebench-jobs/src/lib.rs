//! # queuebench-jobs
//!
//! Job definitions and production machinery for the queuebench harness.
//!
//! This crate provides:
//! - The `WelcomeEmail` job payload and its worker task
//! - A constant (non-exponential) retry policy for failed executions
//! - A producer that submits synthetic batches through per-job transactions
//! - Connection pool management
//!
//! The queue engine itself — durable storage, claiming, leasing, and retry
//! scheduling — is [`underway`], backed by Postgres. This crate only
//! participates in it: one task type, one queue, one producer.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use queuebench_jobs::{
//!     build_queue, create_pool, PoolConfig, Producer, ProducerConfig, QueueSubmitter,
//! };
//!
//! let pool = create_pool("postgres://localhost/postgres", PoolConfig::default()).await?;
//! let queue = build_queue(&pool).await?;
//!
//! let submitter = QueueSubmitter::new(queue);
//! let producer = Producer::new(Arc::new(submitter), pool, ProducerConfig::default());
//! let report = producer.produce_batch().await;
//! println!("inserted {} of {}", report.inserted, report.attempted);
//! ```

pub mod error;
pub mod pool;
pub mod producer;
pub mod welcome;

pub use error::{Error, Result};
pub use pool::{create_pool, PoolConfig};
pub use producer::{
    synthesize_batch, synthesize_email, BatchReport, InsertOutcome, Producer, ProducerConfig,
    QueueSubmitter, SubmitJob, DEFAULT_BATCH_SIZE, DEFAULT_PRODUCE_INTERVAL,
};
pub use welcome::{
    build_queue, constant_retry_policy, WelcomeEmail, WelcomeEmailTask, DEDUP_WINDOW,
    DEFAULT_QUEUE, RETRY_DELAY_MS,
};
