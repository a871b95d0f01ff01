/// One dashboard snapshot. All fields are display-ready strings;
/// cpu/mem/disk each degrade to a placeholder independently when the
/// metrics source is unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Wall-clock time, HH:MM:SS.
    pub time: String,
    /// OS platform string (name + version).
    pub os: String,
    /// Global CPU usage, e.g. "12.5%".
    pub cpu: String,
    /// Used memory, e.g. "43.1%".
    pub mem: String,
    /// Free disk space of the working directory's filesystem, e.g. "58.3 GB free".
    pub disk: String,
}
