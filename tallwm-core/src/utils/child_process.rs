//! Fire-and-forget process spawning and reaping.
use std::collections::HashMap;
use std::process::{Child, Command, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

pub type ChildID = u32;

/// Processes started by the manager that have not been reaped yet.
///
/// The manager never waits on these. They are only collected once they exit so
/// they do not linger as zombies.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `false` if a child with the same id is already known.
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Drop every child that has exited.
    pub fn reap(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |status| status.is_none()));
    }
}

/// Register the `SIGCHLD` signal handler. The flag is set whenever a child exits
/// and has to be cleared by the caller.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    if let Err(err) = signal_hook::flag::register(signal_hook::consts::SIGCHLD, flag) {
        tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err);
    }
}

/// Run `command` through `sh -c` with no stdio attached.
///
/// Failures are logged and otherwise swallowed: the caller never hears whether the
/// program started.
pub fn spawn_shell(command: &str, children: &mut Children) -> Option<ChildID> {
    match Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => {
            let pid = child.id();
            children.insert(child);
            tracing::debug!("Spawned `{}` as pid {}", command, pid);
            Some(pid)
        }
        Err(err) => {
            tracing::error!("Failed to spawn `{}`: {}", command, err);
            None
        }
    }
}
