use std::io::Read;
use std::task::Poll;
use crate::engram::Engram;
use crate::error::Error;

pub struct AndThen<'a> {
    first: Engram<'a>,
    second: Engram<'a>,
}

impl<'a> AndThen<'a> {
    pub fn next<R: Read>(&mut self, r: &mut R, o: &mut usize) -> Poll<Result<(), Error>> {
        match self.first.next(r, o) {
            Poll::Pending => (),
            Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
            Poll::Ready(Ok(())) => {
                match self.second.next(r, o) {
                    Poll::Pending => (),
                    Poll::Ready(Err(e)) => return Poll::Ready(Err(e)),
                    Poll::Ready(Ok(())) => return Poll::Ready(Ok(())),
                }
            }
        }

        Poll::Pending
    }
}

pub fn and_then<'a>(first: Engram<'a>, second: Engram<'a>) -> AndThen<'a> {
    AndThen { first, second }
}
