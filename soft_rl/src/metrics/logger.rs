//! Training loggers.
//!
//! Different logging backends behind one trait: pretty console output for
//! interactive runs, CSV files for analysis, or both at once.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Snapshot of the training state at one point in time.
#[derive(Debug, Clone)]
pub struct TrainingSnapshot {
    /// Completed episodes.
    pub episode: usize,
    /// Total environment steps.
    pub env_steps: usize,
    /// Total gradient updates.
    pub train_steps: usize,
    /// Mean recent episode return.
    pub mean_return: f32,
    /// Latest critic loss.
    pub critic_loss: f32,
    /// Latest actor loss.
    pub actor_loss: f32,
    /// Current entropy coefficient.
    pub alpha: f32,
    /// Latest mean policy entropy.
    pub entropy: f32,
}

impl TrainingSnapshot {
    /// Create a snapshot with zeroed loss fields.
    pub fn new(episode: usize, env_steps: usize, train_steps: usize, mean_return: f32) -> Self {
        Self {
            episode,
            env_steps,
            train_steps,
            mean_return,
            critic_loss: 0.0,
            actor_loss: 0.0,
            alpha: 0.0,
            entropy: 0.0,
        }
    }

    /// Set loss values.
    pub fn with_losses(mut self, critic_loss: f32, actor_loss: f32) -> Self {
        self.critic_loss = critic_loss;
        self.actor_loss = actor_loss;
        self
    }

    /// Set the entropy coefficient.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the mean policy entropy.
    pub fn with_entropy(mut self, entropy: f32) -> Self {
        self.entropy = entropy;
        self
    }
}

/// Logger trait for different backends.
pub trait MetricsLogger: Send {
    /// Log a training snapshot.
    fn log(&mut self, snapshot: &TrainingSnapshot);

    /// Flush any buffered output.
    fn flush(&mut self);
}

// ============================================================================
// Console
// ============================================================================

/// Console logger with aligned columns.
pub struct ConsoleLogger {
    log_interval: usize,
    last_log_episode: usize,
    start_time: Instant,
    show_header: bool,
}

impl ConsoleLogger {
    /// Create a console logger that prints every `log_interval` episodes.
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval: log_interval.max(1),
            last_log_episode: 0,
            start_time: Instant::now(),
            show_header: true,
        }
    }

    fn print_header(&self) {
        println!(
            "{:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8}",
            "Episode", "EnvSteps", "Updates", "Return", "Critic", "Actor", "Alpha", "SPS"
        );
        println!("{}", "-".repeat(82));
    }
}

impl MetricsLogger for ConsoleLogger {
    fn log(&mut self, snapshot: &TrainingSnapshot) {
        if snapshot.episode < self.last_log_episode + self.log_interval {
            return;
        }
        if self.show_header {
            self.print_header();
            self.show_header = false;
        }

        let elapsed = self.start_time.elapsed().as_secs_f32();
        let sps = if elapsed > 0.0 {
            snapshot.env_steps as f32 / elapsed
        } else {
            0.0
        };

        println!(
            "{:>8} {:>10} {:>10} {:>10.1} {:>10.4} {:>10.4} {:>8.3} {:>8.0}",
            snapshot.episode,
            snapshot.env_steps,
            snapshot.train_steps,
            snapshot.mean_return,
            snapshot.critic_loss,
            snapshot.actor_loss,
            snapshot.alpha,
            sps
        );

        self.last_log_episode = snapshot.episode;
    }

    fn flush(&mut self) {
        // stdout is line-buffered, nothing to do
    }
}

// ============================================================================
// CSV
// ============================================================================

/// CSV file logger for offline analysis.
pub struct CsvLogger {
    writer: BufWriter<File>,
    start_time: Instant,
}

impl CsvLogger {
    /// Create a CSV logger writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(
            writer,
            "episode,env_steps,train_steps,mean_return,critic_loss,actor_loss,alpha,entropy,elapsed_secs"
        )?;

        Ok(Self {
            writer,
            start_time: Instant::now(),
        })
    }
}

impl MetricsLogger for CsvLogger {
    fn log(&mut self, snapshot: &TrainingSnapshot) {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let _ = writeln!(
            self.writer,
            "{},{},{},{:.4},{:.6},{:.6},{:.6},{:.6},{:.2}",
            snapshot.episode,
            snapshot.env_steps,
            snapshot.train_steps,
            snapshot.mean_return,
            snapshot.critic_loss,
            snapshot.actor_loss,
            snapshot.alpha,
            snapshot.entropy,
            elapsed
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl Drop for CsvLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

// ============================================================================
// Multi
// ============================================================================

/// Fan-out logger writing to multiple backends.
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Box<dyn MetricsLogger>>,
}

impl MultiLogger {
    /// Create an empty multi-logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a logger.
    pub fn add<L: MetricsLogger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Box::new(logger));
        self
    }
}

impl MetricsLogger for MultiLogger {
    fn log(&mut self, snapshot: &TrainingSnapshot) {
        for logger in &mut self.loggers {
            logger.log(snapshot);
        }
    }

    fn flush(&mut self) {
        for logger in &mut self.loggers {
            logger.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_builders() {
        let snapshot = TrainingSnapshot::new(10, 2_000, 1_000, -150.0)
            .with_losses(0.5, -3.0)
            .with_alpha(0.05)
            .with_entropy(0.8);

        assert_eq!(snapshot.episode, 10);
        assert_eq!(snapshot.env_steps, 2_000);
        assert!((snapshot.critic_loss - 0.5).abs() < 1e-6);
        assert!((snapshot.actor_loss + 3.0).abs() < 1e-6);
        assert!((snapshot.alpha - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_console_logger_interval() {
        let mut logger = ConsoleLogger::new(10);
        logger.log(&TrainingSnapshot::new(5, 500, 100, -300.0));
        logger.log(&TrainingSnapshot::new(10, 1_000, 500, -250.0));
    }

    #[test]
    fn test_csv_logger_writes_rows() {
        let path = std::env::temp_dir().join("soft_rl_csv_logger_test.csv");
        {
            let mut logger = CsvLogger::new(&path).unwrap();
            logger.log(&TrainingSnapshot::new(1, 200, 0, -900.0));
            logger.log(&TrainingSnapshot::new(2, 400, 200, -850.0));
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("episode,env_steps"));
        assert!(lines[1].starts_with("1,200,0,"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_multi_logger() {
        let mut multi = MultiLogger::new().add(ConsoleLogger::new(1));
        multi.log(&TrainingSnapshot::new(1, 100, 0, -500.0));
        multi.flush();
    }
}
