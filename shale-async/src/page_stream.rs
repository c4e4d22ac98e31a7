/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Push-based page sequences driven by a generator future.

use crate::rendezvous;
use pin_project_lite::pin_project;
use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Boxed generator future that feeds a [`PageStream`].
pub type Generator = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pin_project! {
    /// A push-based sequence of pages fed by an async generator.
    ///
    /// The generator receives a [`rendezvous::Sender`] and emits one element
    /// per `send`. Because the channel is demand-driven, the generator cannot
    /// run ahead of the consumer: after each delivered element it parks until
    /// the stream is polled again. Dropping the stream drops the generator,
    /// and an in-flight `send` resolves to an error the generator must treat
    /// as "stop now" — no element is delivered after cancellation.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn docs() {
    /// use shale_async::PageStream;
    /// let mut stream = PageStream::new(|tx| Box::pin(async move {
    ///     if tx.send("first page").await.is_err() {
    ///         return;
    ///     }
    ///     if tx.send("second page").await.is_err() {
    ///         return;
    ///     }
    /// }));
    /// while let Some(page) = stream.next().await {
    ///     println!("{page}");
    /// }
    /// # }
    /// ```
    pub struct PageStream<Item> {
        #[pin]
        rx: rendezvous::Receiver<Item>,
        generator: Option<Generator>,
    }
}

impl<Item> fmt::Debug for PageStream<Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item_typename = std::any::type_name::<Item>();
        write!(f, "PageStream<{item_typename}>")
    }
}

impl<Item> PageStream<Item> {
    /// Creates a stream driven by `generator`.
    pub fn new<G>(generator: G) -> Self
    where
        G: FnOnce(rendezvous::Sender<Item>) -> Generator,
    {
        let (tx, rx) = rendezvous::channel::<Item>();
        Self {
            rx,
            generator: Some(generator(tx)),
        }
    }

    /// Consumes and returns the next element of this stream.
    pub async fn next(&mut self) -> Option<Item>
    where
        Self: Unpin,
    {
        let mut me = Pin::new(self);
        poll_fn(|cx| me.as_mut().poll_next(cx)).await
    }

    /// Attempts to pull out the next element, returning `None` when the
    /// stream is exhausted.
    pub fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Item>> {
        let mut me = self.project();
        match me.rx.poll_recv(cx) {
            Poll::Ready(item) => Poll::Ready(item),
            Poll::Pending => {
                if let Some(generator) = me.generator {
                    if generator.as_mut().poll(cx).is_ready() {
                        // A finished future must not be polled again; forget it.
                        *me.generator = None;
                    }
                }
                Poll::Pending
            }
        }
    }

    /// Drains the stream into a `Vec`.
    pub async fn collect(mut self) -> Vec<Item>
    where
        Self: Unpin,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        items
    }
}

impl<T, E> PageStream<Result<T, E>> {
    /// Yields the next element, or the error the generator delivered.
    pub async fn try_next(&mut self) -> Result<Option<T>, E>
    where
        Self: Unpin,
    {
        self.next().await.transpose()
    }

    /// Produces a new stream by mapping each successful element through `map`
    /// and flattening the result; an error element passes through and ends
    /// the sequence.
    ///
    /// This is how paginated results become a stream of their items.
    pub fn try_flat_map<M, Item, Iter>(mut self, map: M) -> PageStream<Result<Item, E>>
    where
        T: Send + 'static,
        E: Send + 'static,
        M: Fn(T) -> Iter + Send + 'static,
        Item: Send + 'static,
        Iter: IntoIterator<Item = Item> + Send,
        <Iter as IntoIterator>::IntoIter: Send,
    {
        PageStream::new(|tx| {
            Box::pin(async move {
                while let Some(page) = self.next().await {
                    match page {
                        Ok(page) => {
                            for item in map(page) {
                                if tx.send(Ok(item)).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Err(err) => {
                            let _ = tx.send(Err(err)).await;
                            break;
                        }
                    }
                }
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        })
    }
}

#[cfg(test)]
mod test {
    use super::PageStream;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn elements_arrive_in_generator_order() {
        let mut stream = PageStream::new(|tx| {
            Box::pin(async move {
                tx.send(1).await.expect("failed to send");
                tx.send(2).await.expect("failed to send");
                tx.send(3).await.expect("failed to send");
            })
        });
        let mut out = vec![];
        while let Some(value) = stream.next().await {
            out.push(value);
        }
        assert_eq!(vec![1, 2, 3], out);
    }

    /// The generator must not advance until demand exists.
    #[tokio::test]
    async fn generator_waits_for_demand() {
        let progress = Arc::new(Mutex::new(0));
        let mut stream = PageStream::new(|tx| {
            let progress = progress.clone();
            Box::pin(async move {
                *progress.lock().unwrap() = 1;
                tx.send("1").await.expect("failed to send");
                *progress.lock().unwrap() = 2;
                tx.send("2").await.expect("failed to send");
                *progress.lock().unwrap() = 3;
                tx.send("3").await.expect("failed to send");
                *progress.lock().unwrap() = 4;
            })
        });
        assert_eq!(0, *progress.lock().unwrap());
        stream.next().await.expect("ready");
        assert_eq!(1, *progress.lock().unwrap());

        assert_eq!("2", stream.next().await.expect("ready"));
        assert_eq!(2, *progress.lock().unwrap());

        let _ = stream.next().await.expect("ready");
        assert_eq!(3, *progress.lock().unwrap());
        assert_eq!(None, stream.next().await);
        assert_eq!(4, *progress.lock().unwrap());
    }

    // A finished generator must never be polled again; this leaks the sender
    // so the channel stays open while the generator future completes, then
    // polls the stream twice more.
    #[tokio::test]
    async fn finished_generator_is_not_polled_again() {
        let mut stream = PageStream::new(|tx| {
            Box::pin(async move {
                assert!(tx.send("only").await.is_ok());
                Box::leak(Box::new(tx));
            })
        });
        assert_eq!(Some("only"), stream.next().await);
        let mut task = tokio_test::task::spawn(stream);
        let _ = task.enter(|ctx, pin| {
            assert!(pin.poll_next(ctx).is_pending());
        });
        let _ = task.enter(|ctx, pin| {
            assert!(pin.poll_next(ctx).is_pending());
        });
    }

    #[tokio::test]
    async fn try_next_stops_at_first_error() {
        let mut stream = PageStream::new(|tx| {
            Box::pin(async move {
                tx.send(Ok(1)).await.unwrap();
                tx.send(Ok(2)).await.unwrap();
                tx.send(Err("bad page")).await.unwrap();
            })
        });
        let mut out = vec![];
        while let Ok(value) = stream.try_next().await {
            out.push(value);
        }
        assert_eq!(vec![Some(1), Some(2)], out);
    }

    #[tokio::test]
    async fn flattening_pages_yields_their_items() {
        struct Output {
            items: Vec<u8>,
        }
        let stream = PageStream::new(|tx: crate::rendezvous::Sender<Result<Output, &str>>| {
            Box::pin(async move {
                tx.send(Ok(Output {
                    items: vec![1, 2, 3],
                }))
                .await
                .unwrap();
                tx.send(Ok(Output {
                    items: vec![4, 5, 6],
                }))
                .await
                .unwrap();
            })
        });
        let mut flattened = stream.try_flat_map(|output| output.items);
        let mut out = vec![];
        while let Ok(Some(item)) = flattened.try_next().await {
            out.push(item);
        }
        assert_eq!(vec![1, 2, 3, 4, 5, 6], out);
    }

    #[tokio::test]
    async fn flattening_propagates_the_error_and_ends() {
        struct Output {
            items: Vec<u8>,
        }
        let stream = PageStream::new(|tx| {
            Box::pin(async move {
                tx.send(Ok(Output { items: vec![1, 2] })).await.unwrap();
                tx.send(Err("store fell over")).await.unwrap();
            })
        });
        let mut flattened = stream.try_flat_map(|output| output.items);
        assert_eq!(Ok(Some(1)), flattened.try_next().await);
        assert_eq!(Ok(Some(2)), flattened.try_next().await);
        assert_eq!(Err("store fell over"), flattened.try_next().await);
        assert_eq!(Ok(None), flattened.try_next().await);
    }
}
