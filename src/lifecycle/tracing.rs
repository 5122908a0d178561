//! # Observability & Tracing
//!
//! [`setup_tracing`] initialises structured logging for the sync binary.
//!
//! Every client call and every reconciler operation runs inside an
//! `#[instrument]` span, so the partition and namespace being reconciled show
//! up on each line. The reconciler itself only emits `debug!` events for the
//! decision it took; failures are returned to the caller, never logged.
//!
//! ```bash
//! RUST_LOG=info cargo run      # service lifecycle and writes
//! RUST_LOG=debug cargo run     # every read and reconcile decision
//! ```
//!
//! With `RUST_LOG=debug` a first-time creation looks like:
//!
//! ```text
//! DEBUG ensure_exists{partition="default" namespace="team-a"}:read{id=tenancy.v2beta1.Namespace/default/team-a}: Sending request
//! DEBUG Read id=tenancy.v2beta1.Namespace/default/team-a found=false
//! DEBUG ensure_exists{partition="default" namespace="team-a"}:write{id=tenancy.v2beta1.Namespace/default/team-a}: Sending request
//!  INFO Written id=tenancy.v2beta1.Namespace/default/team-a version=1 size=1
//! DEBUG ensure_exists{partition="default" namespace="team-a"}: Namespace created
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
