// Editing module

pub mod services;

pub use services::{
    reconcile_by_id, DocumentSession, EditState, RetryPolicy, SaveReconciler, TotalsReconciler,
};
