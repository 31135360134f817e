// C-compatible FFI bindings for native hosts (Swift, C, C++).
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - String parameters must be valid NUL-terminated UTF-8
// - Caller must call `signalgen_destroy` for each `signalgen_create`
// - Strings returned by `signalgen_get_tag` must be freed with `signalgen_string_free`
// - Arrays returned by `signalgen_get_tags` must be freed with `signalgen_tags_free`
//
// A handle may be shared between threads: the tag list is lock-protected.

use std::cell::RefCell;
use std::ffi::{CStr, CString, c_char};

use log::{debug, warn};

use crate::error::Error;
use crate::generator::{DEFAULT_SAMPLE_RATE, point_count, validate_sine};
use crate::shared::SharedSignalGenerator;

// Logger subsystem identifier
#[cfg(feature = "ios")]
const LOG_SUBSYSTEM: &str = "com.signalgen";

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// Call once at application startup. Log output appears in Console.app and
/// Xcode's debug console.
#[cfg(feature = "ios")]
#[unsafe(no_mangle)]
pub extern "C" fn signalgen_init_logger() {
    oslog::OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(log::LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Status Codes and Errors
// ═══════════════════════════════════════════════════════════════════════════

/// Result of an FFI call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalgenStatus {
    Ok = 0,
    /// An argument violated a generator precondition. See `signalgen_last_error`.
    InvalidArgument = 1,
    NullPointer = 2,
    InvalidUtf8 = 3,
    /// The output buffer holds fewer than `n_points` values.
    BufferTooSmall = 4,
    IndexOutOfRange = 5,
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: impl Into<String>) {
    let message = message.into();
    warn!("signalgen ffi: {}", message);
    // Messages are generated here and never contain NUL
    let message = CString::new(message).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

fn fail(status: SignalgenStatus, message: impl Into<String>) -> SignalgenStatus {
    set_last_error(message);
    status
}

fn invalid_argument(err: Error) -> SignalgenStatus {
    fail(SignalgenStatus::InvalidArgument, err.to_string())
}

/// Message describing the most recent failure on the calling thread.
///
/// Returns NULL if no call on this thread has failed. The pointer stays valid
/// until the next failing call on the same thread.
#[unsafe(no_mangle)]
pub extern "C" fn signalgen_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |message| message.as_ptr())
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Opaque Handle
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque handle to a signal generator.
pub struct SignalGeneratorHandle {
    inner: SharedSignalGenerator,
}

/// Default sample rate for hosts without a preference (48kHz).
#[unsafe(no_mangle)]
pub extern "C" fn signalgen_default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

/// Create a generator sampling at `sample_rate` Hz.
///
/// Returns NULL if `sample_rate` is not a positive finite number; the reason
/// is available from `signalgen_last_error`. The handle must be freed with
/// `signalgen_destroy`.
#[unsafe(no_mangle)]
pub extern "C" fn signalgen_create(sample_rate: f64) -> *mut SignalGeneratorHandle {
    match SharedSignalGenerator::new(sample_rate) {
        Ok(inner) => {
            debug!("signalgen_create: {} Hz", sample_rate);
            Box::into_raw(Box::new(SignalGeneratorHandle { inner }))
        }
        Err(e) => {
            invalid_argument(e);
            std::ptr::null_mut()
        }
    }
}

/// Destroy a generator.
///
/// # Safety
/// `handle` must be a pointer returned by `signalgen_create`, or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_destroy(handle: *mut SignalGeneratorHandle) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Sample rate the generator was created with, or 0.0 for a NULL handle.
///
/// # Safety
/// `handle` must be a valid pointer returned by `signalgen_create`, or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_sample_rate(handle: *const SignalGeneratorHandle) -> f64 {
    if handle.is_null() {
        return 0.0;
    }
    unsafe { (*handle).inner.sample_rate() }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generation
// ═══════════════════════════════════════════════════════════════════════════

/// Render `n_points` sine samples into `out`.
///
/// `out` must have room for at least `n_points` values (`out_len`). Only the
/// first `n_points` entries are written, and nothing is written on failure.
/// Arguments are validated and `out_len` is checked before any sample is
/// computed.
///
/// # Safety
/// `handle` must be valid. `out` must point to `out_len` writable `f64`s.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_generate_sine(
    handle: *const SignalGeneratorHandle,
    amplitude: f64,
    frequency: f64,
    phase: f64,
    n_points: i32,
    out: *mut f64,
    out_len: usize,
) -> SignalgenStatus {
    if handle.is_null() || out.is_null() {
        return fail(SignalgenStatus::NullPointer, "null handle or output buffer");
    }
    let n_points = match point_count(n_points) {
        Ok(n) => n,
        Err(e) => return invalid_argument(e),
    };
    if let Err(e) = validate_sine(frequency, n_points) {
        return invalid_argument(e);
    }

    if out_len < n_points {
        return fail(
            SignalgenStatus::BufferTooSmall,
            format!("output buffer holds {} values, {} needed", out_len, n_points),
        );
    }

    let out = unsafe { std::slice::from_raw_parts_mut(out, n_points) };
    unsafe { (*handle).inner.generator() }.fill_sine(amplitude, frequency, phase, out);
    SignalgenStatus::Ok
}

// ═══════════════════════════════════════════════════════════════════════════
// Tags
// ═══════════════════════════════════════════════════════════════════════════

/// Replace the generator's tags with `count` strings read from `tags`.
///
/// `tags` may be NULL only when `count` is 0, which is rejected as an empty
/// list. On any failure the previous tags are kept.
///
/// # Safety
/// `handle` must be valid. `tags` must point to `count` valid C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_set_tags(
    handle: *const SignalGeneratorHandle,
    tags: *const *const c_char,
    count: usize,
) -> SignalgenStatus {
    if handle.is_null() || (tags.is_null() && count > 0) {
        return fail(SignalgenStatus::NullPointer, "null handle or tag array");
    }

    let raw = if count == 0 {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(tags, count) }
    };

    let mut owned = Vec::with_capacity(raw.len());
    for (index, &tag) in raw.iter().enumerate() {
        if tag.is_null() {
            return fail(SignalgenStatus::NullPointer, format!("tag {} is null", index));
        }
        match unsafe { CStr::from_ptr(tag) }.to_str() {
            Ok(tag) => owned.push(tag.to_string()),
            Err(_) => {
                return fail(
                    SignalgenStatus::InvalidUtf8,
                    format!("tag {} is not valid UTF-8", index),
                );
            }
        }
    }

    match unsafe { (*handle).inner.set_tags(owned) } {
        Ok(()) => SignalgenStatus::Ok,
        Err(e) => invalid_argument(e),
    }
}

/// Copy of the whole tag list, taken under one lock.
///
/// Writes the number of tags to `out_count` and returns an array of that many
/// strings. Returns NULL (with `*out_count` set to 0) on failure. A generator
/// without tags yields a non-NULL array of length 0. The array must be freed
/// with `signalgen_tags_free` using the same count.
///
/// # Safety
/// `handle` must be valid. `out_count` must point to a writable `usize`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_get_tags(
    handle: *const SignalGeneratorHandle,
    out_count: *mut usize,
) -> *mut *mut c_char {
    if out_count.is_null() {
        fail(SignalgenStatus::NullPointer, "null count pointer");
        return std::ptr::null_mut();
    }
    unsafe { *out_count = 0 };
    if handle.is_null() {
        fail(SignalgenStatus::NullPointer, "null handle");
        return std::ptr::null_mut();
    }

    let tags = unsafe { (*handle).inner.get_tags() };
    let strings = match tags.into_iter().map(CString::new).collect::<Result<Vec<_>, _>>() {
        Ok(strings) => strings,
        Err(_) => {
            fail(SignalgenStatus::InvalidUtf8, "tag contains a NUL byte");
            return std::ptr::null_mut();
        }
    };

    let array: Box<[*mut c_char]> = strings.into_iter().map(CString::into_raw).collect();
    unsafe { *out_count = array.len() };
    Box::into_raw(array).cast()
}

/// Free an array returned by `signalgen_get_tags`, including its strings.
///
/// # Safety
/// `tags` must come from `signalgen_get_tags` with the `count` it reported,
/// and not have been freed, or be NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_tags_free(tags: *mut *mut c_char, count: usize) {
    if tags.is_null() {
        return;
    }
    let array = unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(tags, count)) };
    for &tag in array.iter() {
        unsafe { signalgen_string_free(tag) };
    }
}

/// Number of tags currently set (0 for a NULL handle).
///
/// Pairing this with `signalgen_get_tag` is not atomic while another thread
/// sets tags; use `signalgen_get_tags` for a consistent list.
///
/// # Safety
/// `handle` must be a valid pointer returned by `signalgen_create`, or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_tag_count(handle: *const SignalGeneratorHandle) -> usize {
    if handle.is_null() {
        return 0;
    }
    unsafe { (*handle).inner.get_tags().len() }
}

/// Copy of the tag at `index`.
///
/// Returns NULL if the handle is NULL or `index` is out of range. The string
/// must be freed with `signalgen_string_free`.
///
/// # Safety
/// `handle` must be a valid pointer returned by `signalgen_create`, or NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_get_tag(
    handle: *const SignalGeneratorHandle,
    index: usize,
) -> *mut c_char {
    if handle.is_null() {
        fail(SignalgenStatus::NullPointer, "null handle");
        return std::ptr::null_mut();
    }

    let tags = unsafe { (*handle).inner.get_tags() };
    let Some(tag) = tags.into_iter().nth(index) else {
        fail(
            SignalgenStatus::IndexOutOfRange,
            format!("tag index {} out of range", index),
        );
        return std::ptr::null_mut();
    };

    match CString::new(tag) {
        Ok(tag) => tag.into_raw(),
        Err(_) => {
            fail(SignalgenStatus::InvalidUtf8, "tag contains a NUL byte");
            std::ptr::null_mut()
        }
    }
}

/// Free a string returned by `signalgen_get_tag`.
///
/// # Safety
/// `s` must come from `signalgen_get_tag` and not have been freed, or be NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn signalgen_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe { drop(CString::from_raw(s)) };
    }
}
