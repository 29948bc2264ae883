pub mod common;


#[cfg(test)]
mod test_capture;



#[cfg(test)]
mod test_menu;


#[cfg(test)]
mod test_session;
