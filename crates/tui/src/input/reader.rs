//! Background thread that forwards raw tty bytes to the session loop.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{Context, Result};

/// Start reading `tty` on its own thread.
///
/// Chunks arrive on the returned channel in order. The channel disconnects
/// when the tty reaches end of file or fails. The thread blocks in `read`
/// and is left detached when the session ends.
pub(crate) fn spawn(mut tty: File) -> Result<Receiver<Vec<u8>>> {
	let (tx, rx) = mpsc::channel();
	thread::Builder::new()
		.name("frzy-keys".into())
		.spawn(move || {
			let mut buf = [0u8; 1024];
			loop {
				match tty.read(&mut buf) {
					Ok(0) => break,
					Ok(n) => {
						if tx.send(buf[..n].to_vec()).is_err() {
							break;
						}
					}
					Err(err) if err.kind() == ErrorKind::Interrupted => {}
					Err(err) => {
						log::warn!("reading from the terminal failed: {err}");
						break;
					}
				}
			}
		})
		.context("failed to spawn terminal reader thread")?;
	Ok(rx)
}
