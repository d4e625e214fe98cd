use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Run `javap -verbose` on `class_file`. Failures are logged, never fatal.
pub fn run(class_file: &Path) {
    match Command::new("javap").arg("-verbose").arg(class_file).status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("javap exited with {status}"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("javap not found on PATH; skipping disassembly")
        }
        Err(e) => log::warn!("cannot run javap: {e}"),
    }
}
