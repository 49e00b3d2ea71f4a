//! Raw mode for serial-attached printers.
//!
//! `/dev/usb/lp*` nodes are not terminals and pass bytes through as-is. A
//! printer behind a USB-serial adaptor shows up as a TTY instead, and the
//! line discipline would translate `LF`, swallow `0x11`/`0x13` as XON/XOFF,
//! and echo. Those bytes occur freely in raster payloads, so TTYs are
//! switched to raw mode before anything is written.

use std::fs::File;
use std::io;

/// Put `file` into raw mode when it is a terminal; leave other devices alone.
#[cfg(unix)]
pub fn configure_raw_if_tty(file: &File) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    tracing::debug!(fd, "configured tty for raw output");
    Ok(())
}

#[cfg(not(unix))]
pub fn configure_raw_if_tty(_file: &File) -> io::Result<()> {
    Ok(())
}
