// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! COM backend: running object table enumeration and late-bound DTE calls.
//!
//! Everything here must run on the thread that created the
//! [`ComAutomation`], which owns a single-threaded apartment. Message
//! filters only apply to calls made from such an apartment.

#![allow(unsafe_code)]

use std::cell::RefCell;
use std::mem::ManuallyDrop;
use std::path::Path;
use std::ptr;
use std::rc::Rc;
use std::time::Duration;

use vsopen_core::{RejectReason, RetryDecision, RetryPolicy};
use windows::core::{implement, ComInterface, BSTR, GUID, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HWND, VARIANT_BOOL};
use windows::Win32::Media::HTASK;
use windows::Win32::System::Com::{
    CoInitializeEx, CoRegisterMessageFilter, CoTaskMemFree, CoUninitialize, CreateBindCtx,
    GetRunningObjectTable, IBindCtx, IDispatch, IEnumMoniker, IMessageFilter, IMessageFilter_Impl,
    IMoniker, IRunningObjectTable, COINIT_APARTMENTTHREADED, DISPATCH_FLAGS, DISPATCH_METHOD,
    DISPATCH_PROPERTYGET, DISPPARAMS, INTERFACEINFO, PENDINGMSG_WAITDEFPROCESS,
    SERVERCALL_ISHANDLED,
};
use windows::Win32::System::Variant::{
    VariantClear, VARIANT, VT_BOOL, VT_BSTR, VT_DISPATCH, VT_I4, VT_I8,
};
use windows::Win32::UI::WindowsAndMessaging::{AllowSetForegroundWindow, GetWindowThreadProcessId};

use super::{
    Automation, AutomationError, DirectoryEntry, Editor, ItemOperations, Solution, TextSelection,
    Window,
};

const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// Returned from `RetryRejectedCall` to cancel the call.
const CANCEL_CALL: u32 = u32::MAX;

/// COM apartment for the calling thread; uninitialized on drop.
pub struct ComAutomation {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ComAutomation {
    /// Initialize COM as a single-threaded apartment on this thread.
    pub fn initialize() -> Result<Self, AutomationError> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .map_err(|e| AutomationError::Unavailable(format!("CoInitializeEx failed: {e}")))?;
        Ok(Self {
            _not_send: std::marker::PhantomData,
        })
    }
}

impl Drop for ComAutomation {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

impl Automation for ComAutomation {
    type Entry = ComEntry;
    type Editor = ComEditor;
    type FilterGuard = MessageFilterScope;

    fn install_retry_filter(&self, policy: RetryPolicy) -> Result<MessageFilterScope, AutomationError> {
        MessageFilterScope::install(policy)
    }

    fn entries(&self) -> Result<Box<dyn Iterator<Item = ComEntry> + '_>, AutomationError> {
        let rot = unsafe { GetRunningObjectTable(0) }
            .map_err(|e| AutomationError::call("GetRunningObjectTable", e))?;
        let bind_ctx =
            unsafe { CreateBindCtx(0) }.map_err(|e| AutomationError::call("CreateBindCtx", e))?;
        let monikers = unsafe { rot.EnumRunning() }
            .map_err(|e| AutomationError::call("EnumRunning", e))?;
        Ok(Box::new(ComEntries {
            rot,
            bind_ctx,
            monikers,
        }))
    }

    fn allow_set_foreground(&self, pid: u32) -> Result<(), AutomationError> {
        unsafe { AllowSetForegroundWindow(pid) }
            .map_err(|e| AutomationError::call("AllowSetForegroundWindow", e))
    }
}

// -- Message filter ---------------------------------------------------------

#[implement(IMessageFilter)]
struct RetryMessageFilter {
    policy: RetryPolicy,
    previous: Rc<RefCell<Option<IMessageFilter>>>,
}

impl RetryMessageFilter {
    fn previous(&self) -> Option<IMessageFilter> {
        self.previous.borrow().clone()
    }
}

impl IMessageFilter_Impl for RetryMessageFilter {
    fn HandleInComingCall(
        &self,
        dwcalltype: u32,
        htaskcaller: HTASK,
        dwtickcount: u32,
        lpinterfaceinfo: *const INTERFACEINFO,
    ) -> u32 {
        match self.previous() {
            Some(previous) => unsafe {
                previous.HandleInComingCall(dwcalltype, htaskcaller, dwtickcount, lpinterfaceinfo)
            },
            None => SERVERCALL_ISHANDLED.0 as u32,
        }
    }

    fn RetryRejectedCall(&self, htaskcallee: HTASK, dwtickcount: u32, dwrejecttype: u32) -> u32 {
        let elapsed = Duration::from_millis(u64::from(dwtickcount));
        match self
            .policy
            .should_retry(elapsed, RejectReason::from_raw(dwrejecttype))
        {
            RetryDecision::RetryAfter(delay) => {
                u32::try_from(delay.as_millis()).unwrap_or(CANCEL_CALL - 1)
            }
            RetryDecision::Defer => match self.previous() {
                Some(previous) => unsafe {
                    previous.RetryRejectedCall(htaskcallee, dwtickcount, dwrejecttype)
                },
                None => CANCEL_CALL,
            },
        }
    }

    fn MessagePending(&self, htaskcallee: HTASK, dwtickcount: u32, dwpendingtype: u32) -> u32 {
        match self.previous() {
            Some(previous) => unsafe {
                previous.MessagePending(htaskcallee, dwtickcount, dwpendingtype)
            },
            None => PENDINGMSG_WAITDEFPROCESS.0 as u32,
        }
    }
}

/// Keeps a [`RetryMessageFilter`] registered; re-registers the displaced
/// filter on drop, so scopes nest.
pub struct MessageFilterScope {
    previous: Option<IMessageFilter>,
}

impl MessageFilterScope {
    fn install(policy: RetryPolicy) -> Result<Self, AutomationError> {
        let previous_slot = Rc::new(RefCell::new(None));
        let filter: IMessageFilter = RetryMessageFilter {
            policy,
            previous: Rc::clone(&previous_slot),
        }
        .into();

        let mut previous = None;
        unsafe { CoRegisterMessageFilter(&filter, Some(&mut previous as *mut _)) }
            .map_err(|e| AutomationError::call("CoRegisterMessageFilter", e))?;
        *previous_slot.borrow_mut() = previous.clone();

        Ok(Self { previous })
    }
}

impl Drop for MessageFilterScope {
    fn drop(&mut self) {
        let mut ours = None;
        let result = unsafe { CoRegisterMessageFilter(self.previous.as_ref(), Some(&mut ours as *mut _)) };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to restore previous message filter");
        }
    }
}

// -- Running object table ---------------------------------------------------

struct ComEntries {
    rot: IRunningObjectTable,
    bind_ctx: IBindCtx,
    monikers: IEnumMoniker,
}

impl Iterator for ComEntries {
    type Item = ComEntry;

    fn next(&mut self) -> Option<ComEntry> {
        let mut slot = [None];
        let mut fetched = 0u32;
        let hr = unsafe { self.monikers.Next(&mut slot, Some(&mut fetched as *mut u32)) };
        if hr.is_err() || fetched == 0 {
            return None;
        }
        let [moniker] = slot;
        Some(ComEntry {
            rot: self.rot.clone(),
            bind_ctx: self.bind_ctx.clone(),
            moniker: moniker?,
        })
    }
}

pub struct ComEntry {
    rot: IRunningObjectTable,
    bind_ctx: IBindCtx,
    moniker: IMoniker,
}

impl DirectoryEntry for ComEntry {
    type Editor = ComEditor;

    fn display_name(&self) -> Result<String, AutomationError> {
        let raw = unsafe { self.moniker.GetDisplayName(&self.bind_ctx, None::<&IMoniker>) }
            .map_err(|e| AutomationError::call("GetDisplayName", e))?;
        let name = unsafe { raw.to_string() };
        unsafe { CoTaskMemFree(Some(raw.0 as *const _)) };
        name.map_err(|e| AutomationError::call("GetDisplayName", e))
    }

    fn bind(&self) -> Result<ComEditor, AutomationError> {
        let unknown = unsafe { self.rot.GetObject(&self.moniker) }
            .map_err(|e| AutomationError::call("GetObject", e))?;
        let dispatch: IDispatch = unknown
            .cast()
            .map_err(|e| AutomationError::call("QueryInterface(IDispatch)", e))?;
        Ok(ComEditor(Dispatch(dispatch)))
    }
}

// -- Late-bound DTE objects -------------------------------------------------

pub struct ComEditor(Dispatch);

impl Editor for ComEditor {
    type Solution = ComSolution;
    type Window = ComWindow;
    type ItemOperations = ComItemOperations;

    fn full_name(&self) -> Result<String, AutomationError> {
        self.0.get_string("FullName")
    }

    fn solution(&self) -> Result<ComSolution, AutomationError> {
        self.0.get_object("Solution").map(ComSolution)
    }

    fn item_operations(&self) -> Result<ComItemOperations, AutomationError> {
        self.0.get_object("ItemOperations").map(ComItemOperations)
    }

    fn main_window(&self) -> Result<ComWindow, AutomationError> {
        self.0.get_object("MainWindow").map(ComWindow)
    }
}

pub struct ComSolution(Dispatch);

impl Solution for ComSolution {
    fn full_name(&self) -> Result<String, AutomationError> {
        self.0.get_string("FullName")
    }

    fn is_open(&self) -> Result<bool, AutomationError> {
        let value = self.0.get("IsOpen")?;
        value.to_bool().ok_or(AutomationError::Missing("IsOpen"))
    }
}

pub struct ComItemOperations(Dispatch);

impl ItemOperations for ComItemOperations {
    type Window = ComWindow;

    fn open_file(&self, path: &Path, view_kind: &str) -> Result<Option<ComWindow>, AutomationError> {
        let path = path.to_string_lossy();
        let window = self.0.call(
            "OpenFile",
            vec![Variant::from_str(&path), Variant::from_str(view_kind)],
        )?;
        Ok(window.to_dispatch().map(|d| ComWindow(Dispatch(d))))
    }
}

pub struct ComWindow(Dispatch);

impl Window for ComWindow {
    type Selection = ComTextSelection;

    fn selection(&self) -> Result<Option<ComTextSelection>, AutomationError> {
        let value = self.0.get("Selection")?;
        Ok(value.to_dispatch().map(|d| ComTextSelection(Dispatch(d))))
    }

    fn process_id(&self) -> Result<u32, AutomationError> {
        let hwnd = self
            .0
            .get("HWnd")?
            .to_isize()
            .ok_or(AutomationError::Missing("HWnd"))?;
        let mut pid = 0u32;
        let thread = unsafe { GetWindowThreadProcessId(HWND(hwnd), Some(&mut pid as *mut u32)) };
        if thread == 0 {
            return Err(AutomationError::call(
                "GetWindowThreadProcessId",
                windows::core::Error::from_win32(),
            ));
        }
        Ok(pid)
    }

    fn activate(&self) -> Result<(), AutomationError> {
        self.0.call("Activate", Vec::new()).map(drop)
    }
}

pub struct ComTextSelection(Dispatch);

impl TextSelection for ComTextSelection {
    fn goto_line(&self, line: i32, select: bool) -> Result<(), AutomationError> {
        self.0
            .call(
                "GotoLine",
                vec![Variant::from_i32(line), Variant::from_bool(select)],
            )
            .map(drop)
    }

    fn end_of_line(&self, extend: bool) -> Result<(), AutomationError> {
        self.0
            .call("EndOfLine", vec![Variant::from_bool(extend)])
            .map(drop)
    }
}

// -- IDispatch plumbing -----------------------------------------------------

struct Dispatch(IDispatch);

impl Dispatch {
    fn dispid(&self, name: &str) -> Result<i32, AutomationError> {
        let wide = HSTRING::from(name);
        let names = [PCWSTR(wide.as_ptr())];
        let mut id = 0i32;
        unsafe {
            self.0
                .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, LOCALE_USER_DEFAULT, &mut id)
        }
        .map_err(|e| AutomationError::call(name, e))?;
        Ok(id)
    }

    fn invoke(
        &self,
        name: &str,
        flags: DISPATCH_FLAGS,
        mut args: Vec<Variant>,
    ) -> Result<Variant, AutomationError> {
        let id = self.dispid(name)?;
        // IDispatch takes positional arguments last-to-first.
        args.reverse();
        let params = DISPPARAMS {
            rgvarg: args.as_mut_ptr().cast::<VARIANT>(),
            rgdispidNamedArgs: ptr::null_mut(),
            cArgs: args.len() as u32,
            cNamedArgs: 0,
        };
        let mut result = Variant::default();
        unsafe {
            self.0.Invoke(
                id,
                &GUID::zeroed(),
                LOCALE_USER_DEFAULT,
                flags,
                &params,
                Some(&mut result.0 as *mut VARIANT),
                None,
                None,
            )
        }
        .map_err(|e| AutomationError::call(name, e))?;
        Ok(result)
    }

    fn get(&self, name: &str) -> Result<Variant, AutomationError> {
        self.invoke(name, DISPATCH_PROPERTYGET, Vec::new())
    }

    fn call(&self, name: &str, args: Vec<Variant>) -> Result<Variant, AutomationError> {
        self.invoke(name, DISPATCH_METHOD, args)
    }

    fn get_string(&self, name: &'static str) -> Result<String, AutomationError> {
        self.get(name)?.to_string().ok_or(AutomationError::Missing(name))
    }

    fn get_object(&self, name: &'static str) -> Result<Dispatch, AutomationError> {
        self.get(name)?
            .to_dispatch()
            .map(Dispatch)
            .ok_or(AutomationError::Missing(name))
    }
}

/// Owned `VARIANT`, cleared on drop.
#[repr(transparent)]
#[derive(Default)]
struct Variant(VARIANT);

impl Variant {
    fn from_str(value: &str) -> Self {
        let mut variant = Self::default();
        unsafe {
            let inner = &mut *variant.0.Anonymous.Anonymous;
            inner.vt = VT_BSTR;
            inner.Anonymous.bstrVal = ManuallyDrop::new(BSTR::from(value));
        }
        variant
    }

    fn from_i32(value: i32) -> Self {
        let mut variant = Self::default();
        unsafe {
            let inner = &mut *variant.0.Anonymous.Anonymous;
            inner.vt = VT_I4;
            inner.Anonymous.lVal = value;
        }
        variant
    }

    fn from_bool(value: bool) -> Self {
        let mut variant = Self::default();
        unsafe {
            let inner = &mut *variant.0.Anonymous.Anonymous;
            inner.vt = VT_BOOL;
            inner.Anonymous.boolVal = VARIANT_BOOL(if value { -1 } else { 0 });
        }
        variant
    }

    fn to_string(&self) -> Option<String> {
        unsafe {
            let inner = &*self.0.Anonymous.Anonymous;
            (inner.vt == VT_BSTR).then(|| inner.Anonymous.bstrVal.to_string())
        }
    }

    fn to_bool(&self) -> Option<bool> {
        unsafe {
            let inner = &*self.0.Anonymous.Anonymous;
            (inner.vt == VT_BOOL).then(|| inner.Anonymous.boolVal.0 != 0)
        }
    }

    fn to_isize(&self) -> Option<isize> {
        unsafe {
            let inner = &*self.0.Anonymous.Anonymous;
            match inner.vt {
                VT_I4 => Some(inner.Anonymous.lVal as isize),
                VT_I8 => Some(inner.Anonymous.llVal as isize),
                _ => None,
            }
        }
    }

    fn to_dispatch(&self) -> Option<IDispatch> {
        unsafe {
            let inner = &*self.0.Anonymous.Anonymous;
            if inner.vt == VT_DISPATCH {
                (*inner.Anonymous.pdispVal).clone()
            } else {
                None
            }
        }
    }
}

impl Drop for Variant {
    fn drop(&mut self) {
        let _ = unsafe { VariantClear(&mut self.0) };
    }
}
