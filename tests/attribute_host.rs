//! Integration tests for the attribute host.
//!
//! These drive the same request path as the shell and the D-Bus daemon,
//! using the in-memory recorder instead of firmware.

use std::sync::Arc;

use mx5_keyleds::{Attribute, KeyboardLeds, SyncLeds};
use mx5_wmi::{RecordingInterface, WmiChannel};
use mx5kbleds::host::{self, BackendOptions, Request};
use mx5kbleds::DriverConfig;

fn recorded() -> (SyncLeds, Arc<RecordingInterface>) {
    let recorder = Arc::new(RecordingInterface::new());
    let leds = KeyboardLeds::open(WmiChannel::mx5r2(recorder.clone())).unwrap();
    (SyncLeds::new(leds), recorder)
}

fn dry_run() -> BackendOptions {
    BackendOptions {
        dry_run: true,
        printer: None,
    }
}

fn run(leds: &SyncLeds, line: &str) -> String {
    let request = host::parse_request(line).unwrap().unwrap();
    host::execute(leds, &request)
}

#[test]
fn start_applies_startup_palette() {
    let leds = host::start(&DriverConfig::default(), &dry_run()).unwrap();
    assert_eq!(
        host::status(&leds),
        vec![
            ("left".to_string(), "255 0 0".to_string()),
            ("center".to_string(), "0 255 0".to_string()),
            ("right".to_string(), "0 0 255".to_string()),
            ("brightness".to_string(), "255".to_string()),
            ("mode".to_string(), "1".to_string()),
            ("modedesc".to_string(), "custom".to_string()),
        ]
    );
}

#[test]
fn start_without_palette_keeps_defaults() {
    let mut config = DriverConfig::default();
    config.startup.enabled = false;
    let leds = host::start(&config, &dry_run()).unwrap();
    assert_eq!(leds.show(Attribute::Left), "0 0 255\n");
}

#[test]
fn open_fails_on_foreign_guid() {
    let recorder = Arc::new(RecordingInterface::with_guid("00000000-0000-0000-0000-000000000000"));
    assert!(KeyboardLeds::open(WmiChannel::mx5r2(recorder)).is_err());
}

#[test]
fn shell_session() {
    let (leds, recorder) = recorded();

    assert_eq!(run(&leds, "left 10 20 30"), "applied");
    assert_eq!(run(&leds, "left"), "10 20 30");
    assert_eq!(run(&leds, "modedesc wave"), "applied");
    assert_eq!(run(&leds, "mode"), "4");
    assert_eq!(run(&leds, "brightness -5"), "applied");
    assert_eq!(run(&leds, "brightness"), "0");
    assert_eq!(run(&leds, "center 1 2"), "rejected");
    assert_eq!(run(&leds, "modedesc"), "wave");

    assert_eq!(
        recorder.opcodes(),
        vec![0xF01E_0A14, 0x1000_0000, 0xB000_0000, 0xF400_0000]
    );
}

#[test]
fn single_letter_modedesc_gets_terminator() {
    let (leds, _) = recorded();
    run(&leds, "mode 6");
    assert_eq!(run(&leds, "modedesc c"), "applied");
    assert_eq!(leds.show(Attribute::ModeDesc), "custom\n");
}

#[test]
fn status_lists_every_attribute() {
    let (leds, _) = recorded();
    let text = run(&leds, "status");
    assert_eq!(text.lines().count(), Attribute::ALL.len());
    assert!(text.lines().next().unwrap().starts_with("left"));
    assert!(text.contains("modedesc    custom"));
}

#[test]
fn hardware_failure_is_reported() {
    let (leds, recorder) = recorded();
    recorder.fail_always(true);
    assert_eq!(run(&leds, "right 1 1 1"), "hardware-failed");
    assert_eq!(run(&leds, "right"), "1 1 1");
}

#[test]
fn unknown_attribute_is_an_error() {
    assert!(host::parse_request("rgb 1 2 3").is_err());
    assert!(host::parse_request("brightnes").is_err());
    assert_eq!(host::parse_request("quit").unwrap(), Some(Request::Quit));
}
