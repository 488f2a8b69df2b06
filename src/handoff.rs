//! Init handoff: fork the process and exec init in the child.
//!
//! The parent keeps running the scheduler's background phase; the child
//! becomes init. The two never communicate again; preloading is advisory
//! and neither gates the other. The trait seam exists so scheduler tests
//! can exercise both divergence branches without forking.

use std::ffi::{CString, OsString};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use nix::unistd::{ForkResult, execv, fork};

use crate::errors::{BootwarmError, BootwarmResult};

/// Which side of the fork the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Original process; continues background warming.
    Parent,
    /// Forked child on its way to becoming init. With the real fork+exec
    /// implementation this value is never observed, since a successful
    /// exec replaces the child's image; mock implementations return it to
    /// drive the child branch of the scheduler.
    ChildBecameInit,
}

/// Duplicates the process and diverges execution toward init.
pub trait InitHandoff {
    /// Fork; in the child, replace the process image with the init
    /// program, forwarding `argv` verbatim (including `argv[0]`).
    fn handoff(&self, argv: &[OsString]) -> BootwarmResult<Role>;
}

/// The real fork+exec handoff.
#[derive(Debug, Clone)]
pub struct ForkExecHandoff {
    init_program: PathBuf,
}

impl ForkExecHandoff {
    pub fn new(init_program: impl Into<PathBuf>) -> Self {
        Self {
            init_program: init_program.into(),
        }
    }
}

impl InitHandoff for ForkExecHandoff {
    fn handoff(&self, argv: &[OsString]) -> BootwarmResult<Role> {
        // Build the exec arguments up front; the child must not allocate
        // between fork and exec.
        let program = CString::new(self.init_program.as_os_str().as_bytes())
            .map_err(|_| BootwarmError::NulInArgv)?;
        let args = argv
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| BootwarmError::NulInArgv)?;

        // Safety: the child only calls exec (or _exit on failure), so the
        // usual post-fork restrictions in a threaded process are met.
        match unsafe { fork() }.map_err(BootwarmError::Fork)? {
            ForkResult::Parent { child } => {
                tracing::debug!(pid = child.as_raw(), init = %self.init_program.display(), "forked init child");
                Ok(Role::Parent)
            }
            ForkResult::Child => {
                let err = match execv(&program, &args) {
                    Ok(never) => match never {},
                    Err(err) => err,
                };
                // Exec only returns on failure. The child must terminate
                // here rather than unwind back into the scheduler, which
                // belongs to the parent's control flow; there is no
                // fallback init.
                let mut out = std::io::stdout();
                let _ = writeln!(
                    out,
                    "Error: failed to execute {}: {err}.",
                    self.init_program.display()
                );
                let _ = out.flush();
                unsafe { libc::_exit(1) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::wait::{WaitStatus, wait};

    #[test]
    fn test_parent_survives_child_exec_failure() {
        let handoff = ForkExecHandoff::new("/nonexistent/bootwarm-test-init");
        let argv = vec![OsString::from("bootwarm")];

        // Parent path returns immediately; the child fails its exec and
        // exits non-zero without disturbing us.
        let role = handoff.handoff(&argv).unwrap();
        assert_eq!(role, Role::Parent);

        match wait().unwrap() {
            WaitStatus::Exited(_, code) => assert_eq!(code, 1),
            status => panic!("unexpected child status: {status:?}"),
        }
    }

    #[test]
    fn test_interior_nul_is_fatal_before_fork() {
        let handoff = ForkExecHandoff::new("/bin/true");
        let argv = vec![OsString::from("boot\0warm")];

        let err = handoff.handoff(&argv).unwrap_err();
        assert!(matches!(err, BootwarmError::NulInArgv));
    }
}
