pub mod extra_payment;
