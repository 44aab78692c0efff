use std::{
    io::{self, Read, Write},
    sync::Arc,
    thread,
    time::Duration,
};

use super::Error;

pub const BAUD_RATE: u32 = 115_200;

// Reads must not block forever so the reader can notice a dropped `Listener`.
const READ_TIMEOUT: Duration = Duration::from_millis(200);
const READ_BUFFER_LEN: usize = 256;
const CHUNK_QUEUE_LEN: usize = 64;

type Chunk = Result<Vec<u8>, Error>;

/// The sending half of a serial connection.
pub struct Port {
    name: Arc<str>,
    serial: Box<dyn serialport::SerialPort>,
}

impl Port {
    /// Opens the serial port `name` at 115200 8N1.
    ///
    /// Returns the `Port` used to send frames and the `Listener`
    /// receiving the raw incoming bytes.
    pub fn open(name: Arc<str>) -> Result<(Port, Listener), Error> {
        let serial = serialport::new(&*name, BAUD_RATE)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| Error::Open {
                port: name.clone(),
                source,
            })?;

        let reader = serial.try_clone().map_err(|source| Error::Open {
            port: name.clone(),
            source,
        })?;

        let (chunk_tx, chunk_rx) = flume::bounded(CHUNK_QUEUE_LEN);
        thread::Builder::new()
            .name(format!("{name} reader"))
            .spawn(move || read_loop(reader, chunk_tx))
            .map_err(|err| Error::Reader(err.into()))?;

        log::debug!("Connected to {name}");

        Ok((Port { name, serial }, Listener { chunk_rx }))
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn send(&mut self, frame: &[u8]) -> Result<(), Error> {
        self.serial
            .write_all(frame)
            .map_err(|err| Error::Send(err.into()))
    }
}

fn read_loop(mut reader: Box<dyn serialport::SerialPort>, chunk_tx: flume::Sender<Chunk>) {
    let mut buf = [0u8; READ_BUFFER_LEN];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                let _ = chunk_tx.send(Err(Error::BrokenConnection));
                break;
            }
            Ok(len) => {
                if chunk_tx.send(Ok(buf[..len].to_vec())).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                if chunk_tx.is_disconnected() {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => (),
            Err(err) => {
                let _ = chunk_tx.send(Err(Error::Receive(err.into())));
                break;
            }
        }
    }

    log::debug!("Serial port reader stopped");
}

/// The receiving half of a serial connection.
///
/// Bytes are delivered as they arrive: a chunk can hold
/// any part of a line, including several lines.
pub struct Listener {
    chunk_rx: flume::Receiver<Chunk>,
}

impl Listener {
    pub async fn listen(&mut self) -> Result<Vec<u8>, Error> {
        self.chunk_rx
            .recv_async()
            .await
            .map_err(|_| Error::BrokenConnection)?
    }
}
