//! bakery-ffi
//!
//! Minimal C ABI over [`BakeryBooks`] for native presentation shells.
//!
//! Ledger kinds are passed as `0` (income) or `1` (expense). Functions return
//! `0` on success; on failure they return a non-zero code and, when
//! `out_error` is non-null, an owned message the caller releases with
//! [`bakery_string_free`].

use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_double, c_int},
    path::PathBuf,
    ptr,
    sync::Arc,
};

use uuid::Uuid;

use bakery_core::{BakeryBooks, CoreError, EditOutcome, KeyValueStore, MemoryStore, ProfitClass};
use bakery_domain::{LedgerKind, LedgerRecord};
use bakery_storage_json::JsonFileStore;

pub const BAKERY_OK: c_int = 0;
pub const BAKERY_ERR_NULL_ARGUMENT: c_int = 1;
pub const BAKERY_ERR_INVALID_ARGUMENT: c_int = 2;
pub const BAKERY_ERR_STORAGE: c_int = 3;
pub const BAKERY_ERR_RECORD_NOT_FOUND: c_int = 4;

/// Opaque pointer used by external callers to hold a books session.
pub struct BooksHandle {
    inner: BakeryBooks,
}

impl BooksHandle {
    fn new(books: BakeryBooks) -> *mut Self {
        Box::into_raw(Box::new(Self { inner: books }))
    }
}

/// Profit/loss snapshot exposed over FFI.
///
/// `classification` is `-1` for a loss, `0` for break-even and `1` for a profit.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FfiProfitSummary {
    pub income_total: c_double,
    pub expense_total: c_double,
    pub profit: c_double,
    pub percentage: c_double,
    pub classification: c_int,
}

/// Opens a session over `data_dir`, or over a process-local store when `data_dir` is null.
#[no_mangle]
pub extern "C" fn bakery_books_open(
    data_dir: *const c_char,
    out_error: *mut *mut c_char,
) -> *mut BooksHandle {
    clear_error(out_error);
    let storage: Arc<dyn KeyValueStore> = if data_dir.is_null() {
        Arc::new(MemoryStore::new())
    } else {
        let dir = match unsafe { c_string_argument(data_dir) } {
            Ok(value) => PathBuf::from(value),
            Err(err) => {
                unsafe {
                    write_core_error(out_error, err);
                }
                return ptr::null_mut();
            }
        };
        match JsonFileStore::new(dir) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                unsafe {
                    write_core_error(out_error, err);
                }
                return ptr::null_mut();
            }
        }
    };
    BooksHandle::new(BakeryBooks::open(storage))
}

#[no_mangle]
pub extern "C" fn bakery_books_free(handle: *mut BooksHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

/// Returns the number of records in the ledger, or `-1` for a bad handle or kind.
#[no_mangle]
pub extern "C" fn bakery_books_record_count(handle: *const BooksHandle, kind_code: c_int) -> c_int {
    if handle.is_null() {
        return -1;
    }
    let Some(kind) = kind_from_code(kind_code) else {
        return -1;
    };
    let books = unsafe { &(*handle).inner };
    c_int::try_from(books.ledger(kind).len()).unwrap_or(c_int::MAX)
}

#[no_mangle]
pub extern "C" fn bakery_books_total(
    handle: *const BooksHandle,
    kind_code: c_int,
    out_total: *mut c_double,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_total.is_null() {
        unsafe {
            write_error(out_error, "books handle or output total is null");
        }
        return BAKERY_ERR_NULL_ARGUMENT;
    }
    let Some(kind) = kind_from_code(kind_code) else {
        unsafe {
            write_error(out_error, &format!("unknown ledger kind code {kind_code}"));
        }
        return BAKERY_ERR_INVALID_ARGUMENT;
    };
    let books = unsafe { &(*handle).inner };
    unsafe {
        *out_total = books.total(kind);
    }
    BAKERY_OK
}

/// Appends a blank record and writes its id to `out_record_id`.
#[no_mangle]
pub extern "C" fn bakery_books_add_blank(
    handle: *mut BooksHandle,
    kind_code: c_int,
    out_record_id: *mut *mut c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "books handle is null");
        }
        return BAKERY_ERR_NULL_ARGUMENT;
    }
    let Some(kind) = kind_from_code(kind_code) else {
        unsafe {
            write_error(out_error, &format!("unknown ledger kind code {kind_code}"));
        }
        return BAKERY_ERR_INVALID_ARGUMENT;
    };
    let books = unsafe { &mut (*handle).inner };
    let record = books.add_blank(kind);
    unsafe {
        write_string(out_record_id, record.id.to_string());
    }
    BAKERY_OK
}

/// Replaces every field of the record with id `record_id`.
#[no_mangle]
pub extern "C" fn bakery_books_commit_edit(
    handle: *mut BooksHandle,
    kind_code: c_int,
    record_id: *const c_char,
    name: *const c_char,
    amount: c_double,
    notes: *const c_char,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "books handle is null");
        }
        return BAKERY_ERR_NULL_ARGUMENT;
    }
    let Some(kind) = kind_from_code(kind_code) else {
        unsafe {
            write_error(out_error, &format!("unknown ledger kind code {kind_code}"));
        }
        return BAKERY_ERR_INVALID_ARGUMENT;
    };
    if !amount.is_finite() {
        unsafe {
            write_error(out_error, "amount must be a finite number");
        }
        return BAKERY_ERR_INVALID_ARGUMENT;
    }
    let parsed = unsafe {
        parse_uuid(record_id).and_then(|id| {
            Ok(LedgerRecord {
                id,
                name: c_string_argument(name)?,
                amount,
                notes: c_string_argument(notes)?,
            })
        })
    };
    let record = match parsed {
        Ok(record) => record,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            return BAKERY_ERR_INVALID_ARGUMENT;
        }
    };

    let books = unsafe { &mut (*handle).inner };
    let id = record.id;
    match books.commit_edit(kind, record) {
        EditOutcome::Applied => BAKERY_OK,
        EditOutcome::RecordNotFound => {
            unsafe {
                write_error(out_error, &format!("{kind} record {id} not found"));
            }
            BAKERY_ERR_RECORD_NOT_FOUND
        }
    }
}

/// Persists one ledger; expense saves also refresh the `totalSpent` mirror.
#[no_mangle]
pub extern "C" fn bakery_books_save(
    handle: *mut BooksHandle,
    kind_code: c_int,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() {
        unsafe {
            write_error(out_error, "books handle is null");
        }
        return BAKERY_ERR_NULL_ARGUMENT;
    }
    let Some(kind) = kind_from_code(kind_code) else {
        unsafe {
            write_error(out_error, &format!("unknown ledger kind code {kind_code}"));
        }
        return BAKERY_ERR_INVALID_ARGUMENT;
    };
    let books = unsafe { &mut (*handle).inner };
    let result = books.save(kind).and_then(|()| match kind {
        LedgerKind::Expense => books.sync_total_spent().map(|_| ()),
        LedgerKind::Income => Ok(()),
    });
    match result {
        Ok(()) => BAKERY_OK,
        Err(err) => {
            unsafe {
                write_core_error(out_error, err);
            }
            BAKERY_ERR_STORAGE
        }
    }
}

#[no_mangle]
pub extern "C" fn bakery_books_profit_summary(
    handle: *const BooksHandle,
    out_summary: *mut FfiProfitSummary,
    out_error: *mut *mut c_char,
) -> c_int {
    clear_error(out_error);
    if handle.is_null() || out_summary.is_null() {
        unsafe {
            write_error(out_error, "books handle or output summary is null");
        }
        return BAKERY_ERR_NULL_ARGUMENT;
    }
    let summary = unsafe { &(*handle).inner }.profit_summary();
    unsafe {
        *out_summary = FfiProfitSummary {
            income_total: summary.income_total,
            expense_total: summary.expense_total,
            profit: summary.profit,
            percentage: summary.percentage,
            classification: class_to_code(summary.classification),
        };
    }
    BAKERY_OK
}

/// Releases a string previously returned by this library.
#[no_mangle]
pub extern "C" fn bakery_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn kind_from_code(code: c_int) -> Option<LedgerKind> {
    match code {
        0 => Some(LedgerKind::Income),
        1 => Some(LedgerKind::Expense),
        _ => None,
    }
}

fn class_to_code(class: ProfitClass) -> c_int {
    match class {
        ProfitClass::Negative => -1,
        ProfitClass::Zero => 0,
        ProfitClass::Positive => 1,
    }
}

fn clear_error(out_error: *mut *mut c_char) {
    if out_error.is_null() {
        return;
    }
    unsafe {
        *out_error = ptr::null_mut();
    }
}

unsafe fn write_error(out_error: *mut *mut c_char, message: &str) {
    if out_error.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(message) {
        *out_error = cstring.into_raw();
    }
}

unsafe fn write_core_error(out_error: *mut *mut c_char, err: CoreError) {
    write_error(out_error, &err.to_string());
}

unsafe fn write_string(target: *mut *mut c_char, value: String) {
    if target.is_null() {
        return;
    }
    if let Ok(cstring) = CString::new(value) {
        *target = cstring.into_raw();
    }
}

unsafe fn c_string_argument(ptr: *const c_char) -> Result<String, CoreError> {
    if ptr.is_null() {
        return Err(CoreError::InvalidOperation(
            "null string pointer received".into(),
        ));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| s.to_string())
        .map_err(|err| CoreError::InvalidOperation(err.to_string()))
}

unsafe fn parse_uuid(ptr: *const c_char) -> Result<Uuid, CoreError> {
    let raw = c_string_argument(ptr)?;
    Uuid::parse_str(raw.trim())
        .map_err(|err| CoreError::InvalidOperation(format!("invalid record id: {err}")))
}
