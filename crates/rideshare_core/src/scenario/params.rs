/// Default request window: riders and drivers appear within the first 100 time units.
const DEFAULT_REQUEST_WINDOW: u64 = 100;

/// Parameters for building a random scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_riders: usize,
    pub num_drivers: usize,
    /// Random seed for reproducibility (optional; if None, uses entropy).
    pub seed: Option<u64>,
    /// Locations are drawn from `0..grid_size` on both axes.
    pub grid_size: i32,
    /// Request times are uniform in `[0, request_window]`.
    pub request_window: u64,
    pub min_patience: u64,
    pub max_patience: u64,
    pub min_speed: u32,
    pub max_speed: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_riders: 50,
            num_drivers: 10,
            seed: None,
            grid_size: 20,
            request_window: DEFAULT_REQUEST_WINDOW,
            min_patience: 5,
            max_patience: 30,
            min_speed: 1,
            max_speed: 3,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_grid_size(mut self, size: i32) -> Self {
        self.grid_size = size;
        self
    }

    pub fn with_request_window(mut self, window: u64) -> Self {
        self.request_window = window;
        self
    }

    /// Rider patience range (inclusive).
    pub fn with_patience(mut self, min: u64, max: u64) -> Self {
        self.min_patience = min;
        self.max_patience = max;
        self
    }

    /// Driver speed range (inclusive); a zero minimum is raised to 1.
    pub fn with_speed(mut self, min: u32, max: u32) -> Self {
        self.min_speed = min.max(1);
        self.max_speed = max.max(self.min_speed);
        self
    }
}
