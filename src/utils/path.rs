//! Path utilities

use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `base` and lexically remove `.` and `..`
/// components, without touching the file system.
///
/// Leading `..` components that cannot be folded are kept.
pub fn resolve_relative(base: &Path, relative: &str) -> PathBuf {
    let joined = base.join(relative);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match resolved.components().next_back() {
                Some(Component::Normal(_)) => {
                    resolved.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => resolved.push(".."),
            },
            other => resolved.push(other.as_os_str()),
        }
    }

    if resolved.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve_relative(Path::new("infra"), "./modules/net"),
            PathBuf::from("infra/modules/net")
        );
        assert_eq!(
            resolve_relative(Path::new("infra/envs/prod"), "../../modules/net"),
            PathBuf::from("infra/modules/net")
        );
        assert_eq!(
            resolve_relative(Path::new("."), "./modules/net"),
            PathBuf::from("modules/net")
        );
        assert_eq!(
            resolve_relative(Path::new("."), "../shared"),
            PathBuf::from("../shared")
        );
        assert_eq!(
            resolve_relative(Path::new("/srv/infra"), "../../../x"),
            PathBuf::from("/x")
        );
        assert_eq!(resolve_relative(Path::new("a"), ".."), PathBuf::from("."));
    }
}
