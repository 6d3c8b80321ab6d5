use std::collections::HashMap;
use std::path::Path;

/// Map the host working directory into the container.
///
/// The longest mount source containing `cwd` wins. Returns `None` when `cwd`
/// is not under any mount.
pub fn container_workdir(mounts: &HashMap<String, String>, cwd: &Path) -> Option<String> {
    mounts
        .iter()
        .filter_map(|(source, target)| {
            let relative = cwd.strip_prefix(Path::new(source)).ok()?;
            Some((source, target, relative))
        })
        .max_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(b.0)))
        .map(|(_, target, relative)| {
            let target = target.trim_end_matches('/');
            let relative: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if relative.is_empty() {
                if target.is_empty() {
                    "/".to_string()
                } else {
                    target.to_string()
                }
            } else {
                format!("{}/{}", target, relative.join("/"))
            }
        })
}
