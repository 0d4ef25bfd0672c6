//! `NativeKeyboardView` as a [`KeyboardSurface`]
//!
//! The Java half is a hidden `EditText` subclass living in the activity's
//! view tree. The bridge drives it through these instance methods:
//!
//! ```java
//! void displayText(String text);   // setText + setEnabled(true) + cursor to end
//! void requestEditFocus();
//! void clearEditFocus();
//! void showSoftInput();            // InputMethodManager.showSoftInput
//! void hideSoftInput();            // hideSoftInputFromWindow
//! static void postRunPending();    // post(() -> nativeRunPending())
//! ```

use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};
use relay_platform::KeyboardSurface;
use tracing::{debug, warn};

/// Java class hosting the overlay
pub const VIEW_CLASS: &str = "com/relay/engine/NativeKeyboardView";

/// Global reference to the overlay view plus the VM to reach it
pub struct JniKeyboardSurface {
    vm: JavaVM,
    view: GlobalRef,
}

impl JniKeyboardSurface {
    /// Pin `view` for use from later JNI calls
    pub fn new(env: &mut JNIEnv, view: &JObject) -> jni::errors::Result<Self> {
        let vm = env.get_java_vm()?;
        let view = env.new_global_ref(view)?;
        debug!("keyboard view attached");
        Ok(Self { vm, view })
    }

    /// Waker that schedules `nativeRunPending` on the view's UI thread
    ///
    /// The class is resolved here, on the UI thread, since `FindClass` from an
    /// engine thread only sees the system class loader.
    pub fn waker(
        env: &mut JNIEnv,
    ) -> jni::errors::Result<impl Fn() + Send + Sync + 'static> {
        let vm = env.get_java_vm()?;
        let class = env.find_class(VIEW_CLASS)?;
        let class = env.new_global_ref(class)?;

        Ok(move || {
            let mut env = match vm.attach_current_thread() {
                Ok(env) => env,
                Err(e) => {
                    warn!("Failed to attach JNI thread: {:?}", e);
                    return;
                }
            };
            if let Err(e) = env.call_static_method(&class, "postRunPending", "()V", &[]) {
                warn!("postRunPending failed: {}", e);
            }
        })
    }

    fn invoke(&self, method: &str) {
        let mut env = match self.vm.attach_current_thread() {
            Ok(env) => env,
            Err(e) => {
                warn!("Failed to attach JNI thread: {:?}", e);
                return;
            }
        };
        if let Err(e) = env.call_method(&self.view, method, "()V", &[]) {
            warn!("{} failed: {}", method, e);
        }
    }
}

impl KeyboardSurface for JniKeyboardSurface {
    fn display(&mut self, text: &str) {
        let result = self.vm.attach_current_thread().and_then(|mut env| {
            let text = env.new_string(text)?;
            env.call_method(
                &self.view,
                "displayText",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&text)],
            )?;
            Ok(())
        });
        if let Err(e) = result {
            warn!("displayText failed: {}", e);
        }
    }

    fn request_focus(&mut self) {
        self.invoke("requestEditFocus");
    }

    fn clear_focus(&mut self) {
        self.invoke("clearEditFocus");
    }

    fn show_soft_input(&mut self) {
        self.invoke("showSoftInput");
    }

    fn hide_soft_input(&mut self) {
        self.invoke("hideSoftInput");
    }
}
