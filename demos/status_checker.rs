//! Looks up stored classification request ids without an async runtime of
//! its own, then waits on any that are still running.
//!
//! ```text
//! DOCAI_URL=... DOCAI_TOKEN=... cargo run --example status_checker -- <request_id>...
//! ```

use docai_client::{BlockingClient, ClassificationRequest, Status, WaitOptions, init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let ids: Vec<String> = std::env::args().skip(1).collect();
    anyhow::ensure!(!ids.is_empty(), "usage: status_checker <request_id>...");

    let blocking = BlockingClient::from_env()?;
    let batch = blocking.block_on(ClassificationRequest::get_statuses(blocking.client(), &ids))?;
    println!("{} found, {} errors", batch.num_found, batch.num_errors);

    for (id, error) in &batch.request_errors {
        println!("{id}: {error}");
    }

    let pending: Vec<ClassificationRequest> = batch
        .statuses
        .iter()
        .filter(|(_, status)| !status.is_terminal())
        .map(|(id, _)| ClassificationRequest::from_id(blocking.client().clone(), id.clone()))
        .collect();

    for (id, status) in batch.statuses.iter().filter(|(_, s)| s.is_terminal()) {
        println!("{id}: {} {:?}", status.state(), status.classification);
    }

    let options = WaitOptions::from_secs(5.0, 600.0)?;
    for result in blocking.wait_all(&pending, options, 4) {
        let status = result?;
        println!("{}: {} {:?}", status.request_id(), status.state(), status.classification);
    }
    Ok(())
}
