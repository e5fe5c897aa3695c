//! Simulated nRF24L01 for host tests
//!
//! Models the opcode protocol byte by byte, the register file, the three-deep
//! FIFOs, the write-one-to-clear status flags and the CE pulse timing. The SPI
//! bus, both control lines and the delay provider all share one [`Chip`].

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::config::Configuration;
use crate::register::{Interrupts, Register, Status, REGISTER_COUNT};
use crate::Radio;

const FIFO_DEPTH: usize = 3;
const MIN_TX_PULSE_NS: u64 = 10_000;

pub type SimRadio = Radio<SimPin, SimPin, SimSpi, SimDelay>;

#[derive(Debug)]
pub struct Chip {
    registers: [u8; REGISTER_COUNT],
    pub rx_address_p0: [u8; 5],
    pub rx_address_p1: [u8; 5],
    pub tx_address: [u8; 5],
    /// Writes to this register are silently dropped
    pub stuck_register: Option<Register>,
    /// Nothing answers on the bus, MISO reads as zero
    pub absent: bool,
    /// CE pulses never complete a transmission
    pub transmitter_stuck: bool,
    pub csn_low: bool,
    pub ce_high: bool,
    pub ce_edges: Vec<bool>,
    pub last_pulse_ns: Option<u64>,
    pub now_ns: u64,
    ce_rise_ns: u64,
    frame: Vec<u8>,
    /// Every completed bus-select frame, as clocked out by the driver
    pub frames: Vec<Vec<u8>>,
    pub tx_fifo: VecDeque<Vec<u8>>,
    pub rx_fifo: VecDeque<Vec<u8>>,
    /// Payloads that left the antenna
    pub air: Vec<Vec<u8>>,
    pub air_address: Option<[u8; 5]>,
}

impl Chip {
    pub fn new() -> Self {
        let mut registers = [0u8; REGISTER_COUNT];
        for (address, value) in registers.iter_mut().enumerate() {
            if let Some(register) = Register::from_address(address as u8) {
                *value = register.default_value();
            }
        }

        Self {
            registers,
            rx_address_p0: [Register::RxAddressP0.default_value(); 5],
            rx_address_p1: [Register::RxAddressP1.default_value(); 5],
            tx_address: [Register::TxAddress.default_value(); 5],
            stuck_register: None,
            absent: false,
            transmitter_stuck: false,
            csn_low: false,
            ce_high: false,
            ce_edges: Vec::new(),
            last_pulse_ns: None,
            now_ns: 0,
            ce_rise_ns: 0,
            frame: Vec::new(),
            frames: Vec::new(),
            tx_fifo: VecDeque::new(),
            rx_fifo: VecDeque::new(),
            air: Vec::new(),
            air_address: None,
        }
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn register(&self, register: Register) -> u8 {
        match register {
            Register::Status => self.status().0,
            Register::FifoStatus => self.fifo_status(),
            _ => self.registers[register.address() as usize],
        }
    }

    pub fn set_register(&mut self, register: Register, value: u8) {
        self.registers[register.address() as usize] = value;
    }

    pub fn raise(&mut self, interrupts: Interrupts) {
        self.registers[Register::Status.address() as usize] |= interrupts.bits();
    }

    pub fn status(&self) -> Status {
        let flags = self.registers[Register::Status.address() as usize] & Interrupts::all().bits();
        let pipe = if self.rx_fifo.is_empty() { 0b111 } else { 0 };
        let tx_full = (self.tx_fifo.len() >= FIFO_DEPTH) as u8;
        Status(flags | (pipe << 1) | tx_full)
    }

    fn fifo_status(&self) -> u8 {
        let mut value = 0;
        if self.rx_fifo.is_empty() {
            value |= 1 << 0;
        }
        if self.rx_fifo.len() >= FIFO_DEPTH {
            value |= 1 << 1;
        }
        if self.tx_fifo.is_empty() {
            value |= 1 << 4;
        }
        if self.tx_fifo.len() >= FIFO_DEPTH {
            value |= 1 << 5;
        }
        value
    }

    fn config(&self) -> u8 {
        self.registers[Register::Config.address() as usize]
    }

    fn listening(&self) -> bool {
        self.ce_high && self.config() & 0b11 == 0b11
    }

    /// Put a payload in the RX FIFO and raise RX_DR, whatever the mode
    pub fn preload(&mut self, payload: &[u8]) {
        self.rx_fifo.push_back(payload.to_vec());
        self.raise(Interrupts::RX_DR);
    }

    /// A frame addressed to pipe 0 arrives over the air
    pub fn deliver(&mut self, payload: &[u8]) -> bool {
        let address = self.rx_address_p0;
        self.deliver_from(payload, address)
    }

    /// A frame arrives over the air. It lands only while listening, when the
    /// address matches over the configured width and the length matches pipe 0.
    pub fn deliver_from(&mut self, payload: &[u8], address: [u8; 5]) -> bool {
        let width = match self.registers[Register::SetupAddressWidth.address() as usize] & 0b11 {
            0b01 => 3,
            0b10 => 4,
            _ => 5,
        };
        let payload_width = self.registers[Register::RxPayloadWidthP0.address() as usize] as usize;

        if !self.listening()
            || address[..width] != self.rx_address_p0[..width]
            || payload.len() != payload_width
            || self.rx_fifo.len() >= FIFO_DEPTH
        {
            return false;
        }

        self.rx_fifo.push_back(payload.to_vec());
        self.raise(Interrupts::RX_DR);
        true
    }

    fn select(&mut self) {
        self.csn_low = true;
        self.frame.clear();
    }

    fn deselect(&mut self) {
        if !self.csn_low {
            return;
        }
        self.csn_low = false;

        if self.absent || self.frame.is_empty() {
            return;
        }

        let frame = core::mem::take(&mut self.frame);
        match frame[0] {
            0xA0 if frame.len() > 1 && self.tx_fifo.len() < FIFO_DEPTH => {
                self.tx_fifo.push_back(frame[1..].to_vec());
            },
            0x61 if frame.len() > 1 => {
                self.rx_fifo.pop_front();
            },
            _ => (),
        }
        self.frames.push(frame);
    }

    fn exchange(&mut self, mosi: u8) -> u8 {
        if self.absent || !self.csn_low {
            return 0x00;
        }

        let index = self.frame.len();
        self.frame.push(mosi);

        if index == 0 {
            match mosi {
                0xE1 => self.tx_fifo.clear(),
                0xE2 => self.rx_fifo.clear(),
                _ => (),
            }
            return self.status().0;
        }

        let opcode = self.frame[0];
        let offset = index - 1;
        match opcode {
            0x00..=0x1F => self.read_byte(opcode, offset),
            0x20..=0x3F => {
                self.write_byte(opcode & 0x1F, offset, mosi);
                0x00
            },
            0x61 => self
                .rx_fifo
                .front()
                .and_then(|payload| payload.get(offset).copied())
                .unwrap_or(0x00),
            _ => 0x00,
        }
    }

    fn address_register(&mut self, address: u8) -> Option<&mut [u8; 5]> {
        match Register::from_address(address)? {
            Register::RxAddressP0 => Some(&mut self.rx_address_p0),
            Register::RxAddressP1 => Some(&mut self.rx_address_p1),
            Register::TxAddress => Some(&mut self.tx_address),
            _ => None,
        }
    }

    fn read_byte(&mut self, address: u8, offset: usize) -> u8 {
        if let Some(bytes) = self.address_register(address) {
            return bytes[offset.min(4)];
        }
        match Register::from_address(address) {
            Some(register) => self.register(register),
            None => 0x00,
        }
    }

    fn write_byte(&mut self, address: u8, offset: usize, value: u8) {
        let register = match Register::from_address(address) {
            Some(register) => register,
            None => return,
        };
        if self.stuck_register == Some(register) {
            return;
        }

        if let Some(bytes) = self.address_register(address) {
            if offset < 5 {
                bytes[offset] = value;
            }
            return;
        }

        match register {
            Register::Status => {
                self.registers[address as usize] &= !(value & Interrupts::all().bits());
            },
            Register::ObserveTx | Register::CarrierDetect | Register::FifoStatus => (),
            _ if offset == 0 => self.registers[address as usize] = value,
            _ => (),
        }
    }

    fn set_ce(&mut self, high: bool) {
        if high == self.ce_high {
            return;
        }
        self.ce_high = high;
        self.ce_edges.push(high);

        if high {
            self.ce_rise_ns = self.now_ns;
            return;
        }

        let pulse = self.now_ns - self.ce_rise_ns;
        self.last_pulse_ns = Some(pulse);

        let transmitting = self.config() & 0b11 == 0b10;
        if transmitting && pulse >= MIN_TX_PULSE_NS && !self.transmitter_stuck {
            if let Some(payload) = self.tx_fifo.pop_front() {
                self.air.push(payload);
                self.air_address = Some(self.tx_address);
                self.raise(Interrupts::TX_DS);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Ce,
    Csn,
}

pub struct SimPin {
    chip: Rc<RefCell<Chip>>,
    line: Line,
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        match self.line {
            Line::Ce => chip.set_ce(false),
            Line::Csn => chip.select(),
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        match self.line {
            Line::Ce => chip.set_ce(true),
            Line::Csn => chip.deselect(),
        }
        Ok(())
    }
}

pub struct SimSpi {
    chip: Rc<RefCell<Chip>>,
}

impl spi::ErrorType for SimSpi {
    type Error = Infallible;
}

impl SpiBus<u8> for SimSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        for word in words {
            *word = chip.exchange(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        for word in words {
            chip.exchange(*word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        for index in 0..read.len().max(write.len()) {
            let miso = chip.exchange(write.get(index).copied().unwrap_or(0x00));
            if let Some(word) = read.get_mut(index) {
                *word = miso;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let mut chip = self.chip.borrow_mut();
        for word in words {
            *word = chip.exchange(*word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Advances the chip's clock instead of sleeping
pub struct SimDelay {
    chip: Rc<RefCell<Chip>>,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.chip.borrow_mut().now_ns += ns as u64;
    }
}

/// A driver wired to a fresh simulated chip
pub fn sim_radio(configuration: Configuration) -> (SimRadio, SimSpi, SimDelay, Rc<RefCell<Chip>>) {
    let chip = Chip::shared();
    let ce = SimPin { chip: chip.clone(), line: Line::Ce };
    let csn = SimPin { chip: chip.clone(), line: Line::Csn };
    let radio = Radio::new(ce, csn, configuration).unwrap();

    (radio, SimSpi { chip: chip.clone() }, SimDelay { chip: chip.clone() }, chip)
}
