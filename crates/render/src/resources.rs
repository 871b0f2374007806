use std::mem::ManuallyDrop;

use tracing::debug;

use crate::error::RenderResult;

/// Everything created from the loader, released child first: device, debug
/// reporter, instance, then the loader itself.
pub struct Resources<L, I, R, D> {
    device: Option<D>,
    reporter: Option<R>,
    instance: ManuallyDrop<I>,
    loader: L,
}

impl<L, I, R, D> Resources<L, I, R, D> {
    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn instance(&self) -> &I {
        &self.instance
    }

    pub fn reporter(&self) -> Option<&R> {
        self.reporter.as_ref()
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    /// Returns the device, creating it first if there is none yet.
    pub fn device_or_try_insert<F>(&mut self, create: F) -> RenderResult<&D>
    where
        F: FnOnce(&I) -> RenderResult<D>,
    {
        let device = match self.device.take() {
            Some(device) => device,
            None => create(&self.instance)?,
        };
        Ok(self.device.insert(device))
    }
}

impl<L, I, R, D> Drop for Resources<L, I, R, D> {
    fn drop(&mut self) {
        drop(self.device.take());
        drop(self.reporter.take());
        // SAFETY: the instance is never touched again, `self` is being dropped
        unsafe { ManuallyDrop::drop(&mut self.instance) };
        debug!("Released instance resources");
    }
}

/// Runs the instance bootstrap. A failing step releases everything the
/// earlier steps created before the error is returned.
pub fn bootstrap<L, I, R, D, T, C, G, S>(
    loader: L,
    create_instance: C,
    register: G,
    select: S,
) -> RenderResult<(Resources<L, I, R, D>, T)>
where
    C: FnOnce(&L) -> RenderResult<I>,
    G: FnOnce(&L, &I) -> RenderResult<Option<R>>,
    S: FnOnce(&I) -> RenderResult<T>,
{
    let instance = create_instance(&loader)?;

    let mut resources = Resources {
        device: None,
        reporter: None,
        instance: ManuallyDrop::new(instance),
        loader,
    };

    resources.reporter = register(&resources.loader, &*resources.instance)?;
    let selected = select(&*resources.instance)?;

    Ok((resources, selected))
}
