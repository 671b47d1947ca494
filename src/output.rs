use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quadcast_rgb::protocol::{hex, Packet, Transmission};

/// Bytes per hex dump line
const HEX_LINE: usize = 16;

/// How packets are written to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Packets back to back, 64 bytes each
    Raw,
    /// One line per 16 bytes, blank line between packets
    Hex,
}

/// Packet sink standing in for the device transport
pub struct Output {
    sink: Box<dyn Write>,
    format: OutputFormat,
    packets_written: u64,
}

impl Output {
    pub fn new(sink: Box<dyn Write>, format: OutputFormat) -> Self {
        Output {
            sink,
            format,
            packets_written: 0,
        }
    }

    /// Raw packets into a file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .context(format!("Failed to create output file {}", path.display()))?;
        Ok(Output::new(Box::new(BufWriter::new(file)), OutputFormat::Raw))
    }

    /// Hex dump on stdout
    pub fn stdout() -> Self {
        Output::new(Box::new(io::stdout()), OutputFormat::Hex)
    }

    /// Write every packet of `transmission` once.
    ///
    /// A streamed transmission is written as a single loop iteration; the
    /// repetition belongs to the transport.
    pub fn send_transmission(&mut self, transmission: &Transmission) -> Result<()> {
        if self.format == OutputFormat::Hex {
            match transmission {
                Transmission::Save(packets) => {
                    writeln!(self.sink, "# save: {} packets", packets.len())?;
                }
                Transmission::Stream { packets, interval } => {
                    writeln!(self.sink, "# stream: {} packets, loop, {:?} between pairs",
                             packets.len(), interval)?;
                }
            }
        }

        for packet in transmission.packets() {
            self.send_packet(packet)?;
        }

        self.sink.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        match self.format {
            OutputFormat::Raw => self.sink.write_all(packet)
                .context("Failed to write packet")?,
            OutputFormat::Hex => {
                for line in packet.chunks(HEX_LINE) {
                    writeln!(self.sink, "{}", hex(line))?;
                }
                writeln!(self.sink)?;
            }
        }
        self.packets_written += 1;
        Ok(())
    }

    /// Get number of packets written
    pub fn packets_written(&self) -> u64 {
        self.packets_written
    }
}
