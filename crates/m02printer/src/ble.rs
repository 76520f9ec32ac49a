//! BLE link to the M02 using btleplug.
//!
//! Connection establishment lives here, outside the print path: the caller
//! constructs a [`BleTransport`] and hands it to [`crate::Printer`]. The
//! print core only ever sees the [`Transport`] write boundary.

use std::time::Duration;

use btleplug::api::{
    Central, CentralEvent, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use futures::StreamExt;
use tracing::info;
use uuid::Uuid;

use crate::transport::Transport;
use crate::{PrintError, Result};

/// GATT service advertised by the printer.
pub const SERVICE_UUID: Uuid = Uuid::from_u128(0x0000_ff00_0000_1000_8000_00805f9b34fb);

/// Writable characteristic carrying commands and raster data.
pub const WRITE_CHARACTERISTIC: Uuid = Uuid::from_u128(0x0000_ff02_0000_1000_8000_00805f9b34fb);

/// A connected M02 link.
///
/// Writes use `WriteType::WithResponse`, so each write future resolves only
/// once the device has acknowledged the payload. A disconnect mid-job
/// surfaces as the next write failing.
pub struct BleTransport {
    peripheral: Peripheral,
    write_char: Characteristic,
    connected: bool,
}

impl BleTransport {
    /// Scan for an M02 and connect to the first one found.
    ///
    /// Initializes the platform BLE adapter (first available), scans until
    /// a device advertising the printer service appears or `scan_timeout`
    /// elapses, then connects and discovers the write characteristic.
    pub async fn connect(scan_timeout: Duration) -> Result<Self> {
        let manager = Manager::new()
            .await
            .map_err(|e| PrintError::BleConnection(e.to_string()))?;

        let adapters = manager
            .adapters()
            .await
            .map_err(|e| PrintError::BleConnection(e.to_string()))?;

        let adapter = adapters
            .into_iter()
            .next()
            .ok_or_else(|| PrintError::BleConnection("No BLE adapter found".into()))?;

        let peripheral = scan_for_printer(&adapter, scan_timeout).await?;
        Self::from_peripheral(peripheral).await
    }

    /// Connect to an already-discovered peripheral.
    pub async fn from_peripheral(peripheral: Peripheral) -> Result<Self> {
        peripheral
            .connect()
            .await
            .map_err(|e| PrintError::BleConnection(e.to_string()))?;

        peripheral
            .discover_services()
            .await
            .map_err(|e| PrintError::BleConnection(e.to_string()))?;

        let write_char = peripheral
            .characteristics()
            .into_iter()
            .find(|c| c.uuid == WRITE_CHARACTERISTIC)
            .ok_or(PrintError::MissingCharacteristic)?;

        info!("Connected and discovered write characteristic");
        Ok(Self {
            peripheral,
            write_char,
            connected: true,
        })
    }

    /// Disconnect from the device. Subsequent writes fail with
    /// [`PrintError::NotConnected`].
    pub async fn disconnect(&mut self) -> Result<()> {
        info!("Disconnecting BLE device");
        self.connected = false;
        self.peripheral
            .disconnect()
            .await
            .map_err(|e| PrintError::BleConnection(e.to_string()))
    }

    /// Whether the device link is still open.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Transport for BleTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(PrintError::NotConnected);
        }
        self.peripheral
            .write(&self.write_char, data, WriteType::WithResponse)
            .await
            .map_err(|e| PrintError::BleWrite(e.to_string()))
    }
}

/// Scan until a peripheral advertising the printer service shows up.
async fn scan_for_printer(adapter: &Adapter, timeout: Duration) -> Result<Peripheral> {
    info!(?timeout, "Scanning for printer");

    adapter
        .start_scan(ScanFilter::default())
        .await
        .map_err(|e| PrintError::BleScan(e.to_string()))?;

    let mut events = adapter
        .events()
        .await
        .map_err(|e| PrintError::BleScan(e.to_string()))?;

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    let found = loop {
        tokio::select! {
            _ = &mut deadline => break None,
            event = events.next() => {
                let Some(CentralEvent::DeviceDiscovered(id)) = event else {
                    continue;
                };
                if let Ok(peripheral) = adapter.peripheral(&id).await {
                    if let Ok(Some(props)) = peripheral.properties().await {
                        if props.services.contains(&SERVICE_UUID) {
                            info!(name = ?props.local_name, id = %id, "Found printer");
                            break Some(peripheral);
                        }
                    }
                }
            }
        }
    };

    adapter
        .stop_scan()
        .await
        .map_err(|e| PrintError::BleScan(e.to_string()))?;

    found.ok_or(PrintError::PrinterNotFound)
}
