// Unitype CLI
// Type any Unicode character with Ctrl+Shift+U, on any Linux desktop

#[cfg(feature = "linux-input")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "linux-input")]
use std::sync::Arc;
#[cfg(feature = "linux-input")]
use std::time::Duration;

#[cfg(feature = "linux-input")]
use clap::Parser;

#[cfg(feature = "linux-input")]
use unitype_core::config::parse_hex;
#[cfg(feature = "linux-input")]
use unitype_core::{
    autostart, Action, ComposeHandler, Composer, ComposerConfig, ConfigError, DeviceFilter,
    EventLoop, KeyHandler, Key, VirtualDevice,
};

/// Hold Ctrl+Shift, tap U, type a hex codepoint, release (or press Enter/Space)
#[cfg(feature = "linux-input")]
#[derive(Parser, Debug)]
#[command(name = "unitype")]
#[command(author = "unitype contributors")]
#[command(version)]
#[command(about = "System-wide Ctrl+Shift+U Unicode entry", long_about = None)]
struct Args {
    /// Only grab these devices, by name or /dev/input path (repeatable)
    #[arg(short, long, value_name = "DEVICE")]
    devices: Vec<String>,

    /// Start unitype automatically at login, then keep running
    #[arg(long)]
    install: bool,

    /// List keyboards unitype would grab
    #[arg(long)]
    list_devices: bool,

    /// Commit as soon as the typed value exceeds this (hex)
    #[arg(long, value_name = "HEX", default_value = "FFFF", value_parser = parse_max_value)]
    max_value: u32,

    /// Key that immediately stops unitype and releases the keyboards
    #[arg(long, value_name = "KEY")]
    eject_key: Option<Key>,

    /// Milliseconds to wait after each synthesized key event
    #[arg(long, value_name = "MS", default_value_t = 0)]
    key_delay: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "linux-input")]
fn parse_max_value(text: &str) -> Result<u32, ConfigError> {
    let value = parse_hex(text)?;
    ComposerConfig::new().with_max_value(value)?;
    Ok(value)
}

#[cfg(feature = "linux-input")]
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Main application state
#[cfg(feature = "linux-input")]
struct Application {
    config: ComposerConfig,
    args: Args,
    /// Flag to signal event loop to stop
    running: Arc<AtomicBool>,
}

#[cfg(feature = "linux-input")]
impl Application {
    fn new(args: Args) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ComposerConfig::new().with_max_value(args.max_value)?;
        Ok(Self {
            config,
            args,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    fn list_devices() -> Result<(), Box<dyn std::error::Error>> {
        let devices = EventLoop::list_devices()?;
        println!("Found {} keyboard device(s):", devices.len());
        for device in &devices {
            match &device.path {
                Some(path) => println!("  {}: {} ({})", device.index, device.name, path),
                None => println!("  {}: {}", device.index, device.name),
            }
        }
        Ok(())
    }

    fn spawn_signal_handler(&self) {
        use signal_hook::iterator::Signals;
        let running = self.running.clone();

        std::thread::spawn(move || {
            match Signals::new([signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM]) {
                Ok(mut signals) => {
                    if let Some(signal) = signals.forever().next() {
                        log::info!("Received signal {}, shutting down", signal);
                        running.store(false, Ordering::SeqCst);
                    }
                }
                Err(e) => log::warn!("Could not install signal handler: {}", e),
            }
        });
    }

    fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.spawn_signal_handler();

        let filter = DeviceFilter::new(self.args.devices.clone());
        let mut event_loop = EventLoop::new_grabbed(&filter)?;
        log::info!(
            "Grabbed {} device(s): {:?}",
            event_loop.device_count(),
            event_loop.device_names()
        );

        let mut output_device = VirtualDevice::new()?;
        output_device.set_key_delay(self.args.key_delay);
        log::debug!("Virtual uinput device created");

        let mut handler = ComposeHandler::new(Composer::new(self.config), output_device);
        log::info!(
            "unitype is running (max value 0x{:X}). Press Ctrl+C to exit.",
            self.config.max_value()
        );

        let result = self.run_main_loop(&mut event_loop, &mut handler);

        // Cleanup: ungrab devices and release keys
        event_loop.ungrab_all();
        handler.into_sink().close()?;

        result
    }

    fn run_main_loop(
        &self,
        event_loop: &mut EventLoop,
        handler: &mut ComposeHandler<VirtualDevice>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while self.running.load(Ordering::SeqCst) {
            let events = match event_loop.poll_key_events(100) {
                Ok(events) => events,
                Err(e) => {
                    log::warn!("Polling devices failed: {}", e);
                    std::thread::sleep(Duration::from_millis(10));
                    continue;
                }
            };

            for event in events {
                // Emergency eject key: immediate stop for recovery.
                if Some(event.key) == self.args.eject_key && event.action == Action::Press {
                    log::warn!("Emergency eject key pressed. Stopping unitype.");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }

                let consumed = handler.handle(event.key, event.action);
                log::trace!(
                    "{} {} from {} -> {}",
                    event.key,
                    event.action,
                    event.device_name,
                    if consumed { "consumed" } else { "forwarded" }
                );

                // A consumed release still goes out if its press did.
                if handler.sink().must_forward(event.key, event.action, consumed) {
                    if consumed {
                        log::debug!("releasing {} held since before the composition", event.key);
                    }
                    if let Err(e) = handler.sink_mut().forward(event.key, event.action) {
                        log::error!("Error forwarding {}: {}", event.key, e);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(feature = "linux-input")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_devices {
        return Application::list_devices();
    }

    if args.install {
        match autostart::install() {
            Ok(path) => println!("Installed autostart entry: {}", path.display()),
            Err(e) => log::error!("Could not install autostart entry: {}", e),
        }
    }

    let app = Application::new(args)?;
    app.run()
}

// Stub for when linux-input feature is not enabled
#[cfg(not(feature = "linux-input"))]
fn main() {
    eprintln!("Error: unitype requires the 'linux-input' feature to be enabled.");
    eprintln!("Please build with: cargo build --release --features linux-input");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "linux-input")]
    use super::*;

    #[test]
    #[cfg(feature = "linux-input")]
    fn test_args_defaults() {
        let args = Args::parse_from(["unitype"]);

        assert!(args.devices.is_empty());
        assert!(!args.install);
        assert!(!args.list_devices);
        assert_eq!(args.max_value, 0xFFFF);
        assert_eq!(args.eject_key, None);
        assert_eq!(args.key_delay, 0);
        assert!(!args.verbose);
    }

    #[test]
    #[cfg(feature = "linux-input")]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "unitype",
            "--devices",
            "/dev/input/event0",
            "-d",
            "AT Translated Set 2 keyboard",
            "--max-value",
            "0x10FFFF",
            "--eject-key",
            "pause",
            "--key-delay",
            "5",
            "--install",
            "-v",
        ]);

        assert_eq!(args.devices.len(), 2);
        assert_eq!(args.devices[1], "AT Translated Set 2 keyboard");
        assert_eq!(args.max_value, 0x10FFFF);
        assert_eq!(args.eject_key, Some(Key::from(119)));
        assert_eq!(args.key_delay, 5);
        assert!(args.install);
        assert!(args.verbose);
    }

    #[test]
    #[cfg(feature = "linux-input")]
    fn test_args_reject_bad_max_value() {
        assert!(Args::try_parse_from(["unitype", "--max-value", "110000"]).is_err());
        assert!(Args::try_parse_from(["unitype", "--max-value", "zz"]).is_err());
        assert!(Args::try_parse_from(["unitype", "--eject-key", "nokey"]).is_err());
    }

    #[test]
    #[cfg(feature = "linux-input")]
    fn test_application_uses_max_value() {
        let args = Args::parse_from(["unitype", "--max-value", "FF"]);
        let app = Application::new(args).unwrap();
        assert_eq!(app.config.max_value(), 0xFF);
        assert!(app.running.load(Ordering::SeqCst));
    }
}
