// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Streams and metadata come from the hosting
// Activity's `ContentResolver`, so any `content://` URI granted by the
// Storage Access Framework picker can be read without copying it through
// Java first.
//
// ## Handle lifetimes
//
// The Java `InputStream` is wrapped in [`JavaInputStream`], which closes it in
// `Drop`. The metadata `Cursor` is held by a [`CursorGuard`] that closes it in
// `Drop`. The worker thread stays attached to the VM, so each lookup and each
// stream open runs inside `with_local_frame`; only the `GlobalRef`s held by
// `JavaInputStream` outlive the frame. Java exceptions raised by any call are
// cleared before control returns to Rust callers.

#![cfg(target_os = "android")]

use std::io::{self, Read};
use std::sync::OnceLock;

use jni::objects::{GlobalRef, JByteArray, JObject, JString, JValue};
use jni::sys::jsize;
use jni::{JNIEnv, JavaVM};

use pdf_reader_core::error::{BridgeError, Result};
use pdf_reader_core::types::{NameLookup, ResourceIdentifier};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `OpenableColumns.DISPLAY_NAME`.
const DISPLAY_NAME_COLUMN: &str = "_display_name";

/// Size of the Java-side read buffer.
const STREAM_CHUNK: jsize = 8192;

/// Local references reserved for one `display_name` or `open_stream` frame.
const LOCAL_FRAME_CAPACITY: i32 = 16;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The process-wide `JavaVM`, taken from the NDK context on first use.
fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| BridgeError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Attach the current thread and return its [`JNIEnv`].
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| BridgeError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(BridgeError::Bridge(
            "Android context is null: native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a `jni::errors::Error` into `BridgeError::Bridge`, clearing any Java
/// exception it left pending.
fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> BridgeError {
    match take_exception(env) {
        Some(exception) => BridgeError::Bridge(format!("{context}: {exception}")),
        None => BridgeError::Bridge(format!("{context}: {e}")),
    }
}

/// Clear a pending Java exception and describe it.
fn take_exception(env: &mut JNIEnv<'_>) -> Option<String> {
    if !env.exception_check().unwrap_or(false) {
        return None;
    }
    let throwable = env.exception_occurred().ok();
    let _ = env.exception_clear();
    let throwable = throwable?;
    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .ok()
        .and_then(|obj| {
            let text = JString::from(obj);
            let description = env.get_string(&text).ok().map(String::from);
            let _ = env.delete_local_ref(text);
            description
        });
    let _ = env.exception_clear();
    let _ = env.delete_local_ref(throwable);
    Some(description.unwrap_or_else(|| "java exception".into()))
}

/// `Uri.parse(raw)`.
fn parse_uri<'a>(env: &mut JNIEnv<'a>, raw: &str) -> Result<JObject<'a>> {
    let j_raw: JString = env
        .new_string(raw)
        .map_err(|e| jni_err(env, "new_string(uri)", e))?;
    let uri = env
        .call_static_method(
            "android/net/Uri",
            "parse",
            "(Ljava/lang/String;)Landroid/net/Uri;",
            &[JValue::Object(&j_raw)],
        )
        .and_then(|v| v.l());
    uri.map_err(|e| jni_err(env, "Uri.parse", e))
}

/// `activity.getContentResolver()`.
fn content_resolver<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
    let resolver = env
        .call_method(
            activity,
            "getContentResolver",
            "()Landroid/content/ContentResolver;",
            &[],
        )
        .and_then(|v| v.l());
    resolver.map_err(|e| jni_err(env, "getContentResolver", e))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the content bridge.
///
/// Zero-sized; all state lives on the Java side.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }

    /// Read `OpenableColumns.DISPLAY_NAME` for `uri_string`.
    ///
    /// Runs inside its own local reference frame, so every local created
    /// along the way is released when the frame pops.
    fn display_name(&self, uri_string: &str) -> Result<Option<String>> {
        let mut env = jni_env()?;
        let activity = activity()?;
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
            Ok::<_, jni::errors::Error>(query_display_name_column(env, &activity, uri_string))
        })
        .map_err(|e| BridgeError::Bridge(format!("local frame(display name): {e}")))?
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// `resolver.query(uri, null, null, null, null)` and read the first row.
fn query_display_name_column(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
    uri_string: &str,
) -> Result<Option<String>> {
    let uri = parse_uri(env, uri_string)?;
    let resolver = content_resolver(env, activity)?;

    let null = JObject::null();
    let cursor = env
        .call_method(
            &resolver,
            "query",
            "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
            &[
                JValue::Object(&uri),
                JValue::Object(&null),
                JValue::Object(&null),
                JValue::Object(&null),
                JValue::Object(&null),
            ],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "ContentResolver.query", e))?;
    if cursor.is_null() {
        return Ok(None);
    }

    let mut guard = CursorGuard { env, cursor };
    read_display_name(&mut *guard.env, &guard.cursor)
}

/// Metadata `Cursor`, closed on drop.
struct CursorGuard<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    cursor: JObject<'local>,
}

impl Drop for CursorGuard<'_, '_> {
    fn drop(&mut self) {
        if let Err(e) = self.env.call_method(&self.cursor, "close", "()V", &[]) {
            let e = jni_err(self.env, "Cursor.close", e);
            tracing::warn!(error = %e, "Android: failed to close metadata cursor");
        }
    }
}

/// First row's display-name column, if any.
fn read_display_name(env: &mut JNIEnv<'_>, cursor: &JObject<'_>) -> Result<Option<String>> {
    let has_row = env
        .call_method(cursor, "moveToFirst", "()Z", &[])
        .and_then(|v| v.z())
        .map_err(|e| jni_err(env, "Cursor.moveToFirst", e))?;
    if !has_row {
        return Ok(None);
    }

    let j_column: JString = env
        .new_string(DISPLAY_NAME_COLUMN)
        .map_err(|e| jni_err(env, "new_string(column)", e))?;
    let index = env
        .call_method(
            cursor,
            "getColumnIndexOrThrow",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&j_column)],
        )
        .and_then(|v| v.i())
        .map_err(|e| jni_err(env, "Cursor.getColumnIndexOrThrow", e))?;

    let value = env
        .call_method(cursor, "getString", "(I)Ljava/lang/String;", &[JValue::Int(index)])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "Cursor.getString", e))?;
    if value.is_null() {
        return Ok(None);
    }
    let name: String = env
        .get_string(&JString::from(value))
        .map_err(|e| jni_err(env, "get_string(displayName)", e))?
        .into();
    Ok(Some(name))
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// ContentResolver: android.content.ContentResolver
// ---------------------------------------------------------------------------

impl ContentResolver for AndroidBridge {
    /// Open an `InputStream` via `ContentResolver.openInputStream(uri)`.
    ///
    /// A `FileNotFoundException` or `SecurityException` (revoked grant,
    /// deleted document) and a `null` stream both mean "no stream".
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(uri = %id, "Android: opening content stream");

        let handles = env
            .with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
                Ok::<_, jni::errors::Error>(open_input_stream(env, &activity, id))
            })
            .map_err(|e| BridgeError::Bridge(format!("local frame(open stream): {e}")))??;
        let Some((stream, buffer)) = handles else {
            return Ok(None);
        };

        Ok(Some(Box::new(JavaInputStream {
            env,
            stream,
            buffer,
            scratch: vec![0; STREAM_CHUNK as usize],
        })))
    }

    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup {
        match self.display_name(id.as_str()) {
            Ok(name) => NameLookup::from(name),
            Err(e) => {
                tracing::debug!(uri = %id, error = %e, "Android: display name lookup failed");
                NameLookup::NotFound
            }
        }
    }
}

/// `resolver.openInputStream(uri)` plus a Java read buffer, both promoted to
/// global references. `None` when the provider refuses or has no stream.
fn open_input_stream(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
    id: &ResourceIdentifier,
) -> Result<Option<(GlobalRef, GlobalRef)>> {
    let uri = parse_uri(env, id.as_str())?;
    let resolver = content_resolver(env, activity)?;

    let opened = env
        .call_method(
            &resolver,
            "openInputStream",
            "(Landroid/net/Uri;)Ljava/io/InputStream;",
            &[JValue::Object(&uri)],
        )
        .and_then(|v| v.l());
    let input_stream = match opened {
        Ok(stream) => stream,
        Err(jni::errors::Error::JavaException) => {
            let reason = take_exception(env);
            tracing::info!(uri = %id, ?reason, "Android: openInputStream refused");
            return Ok(None);
        }
        Err(e) => return Err(jni_err(env, "openInputStream", e)),
    };
    if input_stream.is_null() {
        tracing::info!(uri = %id, "Android: ContentResolver returned null InputStream");
        return Ok(None);
    }

    let stream = match env.new_global_ref(&input_stream) {
        Ok(global) => global,
        Err(e) => {
            let _ = env.call_method(&input_stream, "close", "()V", &[]);
            return Err(jni_err(env, "new_global_ref(stream)", e));
        }
    };
    let buffer = env
        .new_byte_array(STREAM_CHUNK)
        .and_then(|array| env.new_global_ref(array))
        .map_err(|e| jni_err(env, "new_byte_array(chunk)", e));
    match buffer {
        Ok(buffer) => Ok(Some((stream, buffer))),
        Err(e) => {
            close_stream(env, &stream);
            Err(e)
        }
    }
}

// ---------------------------------------------------------------------------
// java.io.InputStream adapter
// ---------------------------------------------------------------------------

/// `Read` over a Java `InputStream`, closed on drop.
struct JavaInputStream {
    env: JNIEnv<'static>,
    stream: GlobalRef,
    buffer: GlobalRef,
    scratch: Vec<i8>,
}

impl Read for JavaInputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let want = buf.len().min(self.scratch.len()) as jsize;

        // int n = stream.read(buffer, 0, want)
        let read = self
            .env
            .call_method(
                self.stream.as_obj(),
                "read",
                "([BII)I",
                &[
                    JValue::Object(self.buffer.as_obj()),
                    JValue::Int(0),
                    JValue::Int(want),
                ],
            )
            .and_then(|v| v.i());
        let n = match read {
            Ok(n) if n < 0 => return Ok(0),
            Ok(n) => n as usize,
            Err(e) => {
                let e = jni_err(&mut self.env, "InputStream.read", e);
                return Err(io::Error::other(e.to_string()));
            }
        };

        let array: &JByteArray<'_> = self.buffer.as_obj().into();
        if let Err(e) = self
            .env
            .get_byte_array_region(array, 0, &mut self.scratch[..n])
        {
            let e = jni_err(&mut self.env, "get_byte_array_region", e);
            return Err(io::Error::other(e.to_string()));
        }
        for (dst, src) in buf[..n].iter_mut().zip(&self.scratch[..n]) {
            *dst = *src as u8;
        }
        Ok(n)
    }
}

impl Drop for JavaInputStream {
    fn drop(&mut self) {
        close_stream(&mut self.env, &self.stream);
    }
}

fn close_stream(env: &mut JNIEnv<'_>, stream: &GlobalRef) {
    if let Err(e) = env.call_method(stream.as_obj(), "close", "()V", &[]) {
        let e = jni_err(env, "InputStream.close", e);
        tracing::warn!(error = %e, "Android: failed to close content stream");
    }
}
