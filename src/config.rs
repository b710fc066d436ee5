use std::path::PathBuf;

use eframe::egui;

/// Survey file read when no path is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Startup configuration: where the survey lives and how big the window is.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1400.0, 860.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

impl DashboardConfig {
    /// The only argument is an optional path to the survey file.
    /// `args` excludes the program name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.window_size)
                .with_min_inner_size(self.min_window_size),
            ..Default::default()
        }
    }
}
