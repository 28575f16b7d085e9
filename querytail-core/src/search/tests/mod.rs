mod poller_tests;
