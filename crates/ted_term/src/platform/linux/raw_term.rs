use std::fs::File;
use std::io::{self, Read, Write};
use std::mem::{self, ManuallyDrop};
use std::os::fd::{FromRawFd, RawFd};

use libc::{termios as Termios, winsize as Winsize, STDIN_FILENO, STDOUT_FILENO};

use crate::units::OffsetU16;

macro_rules! cvt {
    ($res:expr) => {{
        match $res {
            -1 => Err(io::Error::last_os_error()),
            res => Ok(res),
        }
    }};
}

unsafe fn get_termios(fd: RawFd) -> io::Result<Termios> {
    unsafe {
        let mut termios: Termios = mem::zeroed();
        cvt!(libc::tcgetattr(fd, &mut termios))?;
        Ok(termios)
    }
}

unsafe fn set_termios(fd: RawFd, termios: &Termios) -> io::Result<()> {
    cvt!(unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) })?;
    Ok(())
}

unsafe fn get_size(fd: RawFd) -> io::Result<OffsetU16> {
    let mut size: Winsize = unsafe { mem::zeroed() };
    cvt!(unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) })?;
    Ok(OffsetU16::new(size.ws_col, size.ws_row))
}

/// Raw mode on stdin, for as long as this value lives.
///
/// Writes go straight to stdout.
pub struct RawTerm {
    termios_prev: Termios,
}

impl RawTerm {
    pub fn new() -> io::Result<Self> {
        unsafe {
            let mut termios = get_termios(STDIN_FILENO)?;
            let termios_prev = termios;

            libc::cfmakeraw(&mut termios);

            // Reads block until at least one byte is available.
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            set_termios(STDIN_FILENO, &termios)?;

            log::debug!("entered raw mode");

            Ok(Self { termios_prev })
        }
    }

    pub fn size(&self) -> io::Result<OffsetU16> {
        unsafe { get_size(STDOUT_FILENO) }
    }
}

impl Drop for RawTerm {
    fn drop(&mut self) {
        match unsafe { set_termios(STDIN_FILENO, &self.termios_prev) } {
            Ok(()) => log::debug!("restored terminal settings"),
            Err(err) => log::error!("couldn't restore terminal settings: {err}"),
        }
    }
}

impl Write for RawTerm {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        fd_file(STDOUT_FILENO).write(buf)
    }

    fn write_vectored(&mut self, bufs: &[io::IoSlice]) -> io::Result<usize> {
        fd_file(STDOUT_FILENO).write_vectored(bufs)
    }

    fn flush(&mut self) -> io::Result<()> {
        fd_file(STDOUT_FILENO).flush()
    }
}

/// Unbuffered reads from stdin.
pub struct RawStdin;

impl Read for RawStdin {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fd_file(STDIN_FILENO).read(buf)
    }
}

/// Borrow a standard stream as a `File` without closing it afterwards.
fn fd_file(fd: RawFd) -> ManuallyDrop<File> {
    ManuallyDrop::new(unsafe { File::from_raw_fd(fd) })
}
