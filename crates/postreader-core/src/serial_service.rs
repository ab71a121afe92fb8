use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::time::Duration;

use crate::error::{Error, Result};

/// A port as reported by the host's port registry.
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    pub port_name: String,
    pub kind: &'static str,
    /// USB vendor and product id, for USB adapters only.
    pub usb_id: Option<(u16, u16)>,
    pub product: Option<String>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let mut port = PortInfo {
            port_name: info.port_name,
            kind: "Unknown",
            usb_id: None,
            product: None,
        };
        match info.port_type {
            SerialPortType::UsbPort(usb) => {
                port.kind = "USB";
                port.usb_id = Some((usb.vid, usb.pid));
                port.product = usb.product;
            }
            SerialPortType::PciPort => port.kind = "PCI",
            SerialPortType::BluetoothPort => port.kind = "Bluetooth",
            SerialPortType::Unknown => {}
        }
        port
    }
}

impl std::fmt::Display for PortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.port_name, self.kind)?;
        if let Some((vid, pid)) = self.usb_id {
            write!(f, " {vid:04X}:{pid:04X}")?;
        }
        if let Some(product) = &self.product {
            write!(f, " {product}")?;
        }
        Ok(())
    }
}

/// Line settings used when opening the reader. The device is a USB CDC
/// endpoint, so these are only the transport's customary defaults.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow_control: serialport::FlowControl,
    /// How long a single read or write waits before the transport checks
    /// again. Transfers as a whole never give up.
    pub wait_slice: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9_600,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow_control: serialport::FlowControl::None,
            wait_slice: Duration::from_secs(1),
        }
    }
}

pub struct SerialService;

impl SerialService {
    pub fn list_ports() -> Result<Vec<PortInfo>> {
        let ports = serialport::available_ports().map_err(Error::Enumerate)?;
        Ok(ports.into_iter().map(PortInfo::from).collect())
    }

    /// Picks the first port the registry reports.
    pub fn first_port() -> Result<PortInfo> {
        Self::first_of(Self::list_ports()?)
    }

    pub fn first_of(ports: Vec<PortInfo>) -> Result<PortInfo> {
        ports.into_iter().next().ok_or(Error::NoDeviceFound)
    }

    pub fn open(port_name: &str, cfg: &SerialConfig) -> Result<Box<dyn SerialPort>> {
        serialport::new(port_name, cfg.baud_rate)
            .data_bits(cfg.data_bits)
            .parity(cfg.parity)
            .stop_bits(cfg.stop_bits)
            .flow_control(cfg.flow_control)
            .timeout(cfg.wait_slice)
            .open()
            .map_err(|source| Error::Connection {
                port: port_name.to_string(),
                source,
            })
    }

    /// Opens the first available port. This is the only start-up path the
    /// reader has: no port is `NoDeviceFound`, an unopenable one is `Connection`.
    pub fn initialize(cfg: &SerialConfig) -> Result<(PortInfo, Box<dyn SerialPort>)> {
        let info = Self::first_port()?;
        log::debug!("opening {} at {} baud", info.port_name, cfg.baud_rate);
        let port = Self::open(&info.port_name, cfg)?;
        Ok((info, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usb_info() -> PortInfo {
        PortInfo::from(SerialPortInfo {
            port_name: "/dev/ttyACM0".to_string(),
            port_type: SerialPortType::UsbPort(serialport::UsbPortInfo {
                vid: 0x2E8A,
                pid: 0x000A,
                serial_number: Some("E6614C311B".to_string()),
                manufacturer: Some("Raspberry Pi".to_string()),
                product: Some("Pico".to_string()),
            }),
        })
    }

    fn plain_info(name: &str) -> PortInfo {
        PortInfo::from(SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::Unknown,
        })
    }

    #[test]
    fn usb_port_info_is_flattened() {
        let info = usb_info();
        assert_eq!(info.kind, "USB");
        assert_eq!(info.usb_id, Some((0x2E8A, 0x000A)));
        assert_eq!(info.product.as_deref(), Some("Pico"));
    }

    #[test]
    fn unknown_port_has_no_usb_details() {
        let info = plain_info("/dev/ttyS0");
        assert_eq!(info.kind, "Unknown");
        assert_eq!(info.usb_id, None);
        assert_eq!(info.product, None);
    }

    #[test]
    fn no_ports_is_no_device_found() {
        assert!(matches!(SerialService::first_of(Vec::new()), Err(Error::NoDeviceFound)));
    }

    #[test]
    fn first_listed_port_is_picked() {
        let ports = vec![usb_info(), plain_info("/dev/ttyS0")];
        let picked = SerialService::first_of(ports).unwrap();
        assert_eq!(picked, usb_info());
    }

    #[test]
    fn display_includes_ids_and_product() {
        assert_eq!(usb_info().to_string(), "/dev/ttyACM0 [USB] 2E8A:000A Pico");
    }

    #[test]
    fn display_for_non_usb_port() {
        let info = PortInfo::from(SerialPortInfo {
            port_name: "COM1".to_string(),
            port_type: SerialPortType::PciPort,
        });
        assert_eq!(info.to_string(), "COM1 [PCI]");
    }

    #[test]
    fn defaults_are_plain_8n1() {
        let cfg = SerialConfig::default();
        assert_eq!(cfg.baud_rate, 9_600);
        assert_eq!(cfg.data_bits, serialport::DataBits::Eight);
        assert_eq!(cfg.parity, serialport::Parity::None);
        assert_eq!(cfg.stop_bits, serialport::StopBits::One);
        assert_eq!(cfg.flow_control, serialport::FlowControl::None);
    }

    #[test]
    fn open_missing_port_is_connection_error() {
        let err = SerialService::open("/nonexistent/post-reader-port", &SerialConfig::default())
            .err()
            .expect("opening a missing port must fail");
        match err {
            Error::Connection { port, .. } => assert_eq!(port, "/nonexistent/post-reader-port"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
