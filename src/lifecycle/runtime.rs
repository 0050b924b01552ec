//! Runtime for the waiting stages.
//!
//! Name resolution inside `TcpStream::connect` runs on tokio's blocking
//! pool. A timed-out attempt abandons its lookup, but a plain runtime drop
//! would still wait for it. The runtime is therefore shut down in the
//! background, so neither the failure exit nor the exec waits on a stuck
//! resolver.

use std::future::Future;

use tokio::runtime::Builder;

/// Run `future` to completion on a current-thread runtime, then shut the
/// runtime down without waiting for outstanding blocking tasks.
pub fn block_on_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}
